use crate::{Field, ParseError, Step, StepDecoder, StreamingDecoder, decode_record, produce_chunks};

#[test]
fn injected_bytes_resume_from_the_same_logical_position() {
    let mut decoder = StepDecoder::new();
    assert_eq!(
        decoder.step(Some(b":i a".as_slice())).unwrap(),
        Step::NeedData
    );
    // The rolled-back prefix and the injected bytes must join seamlessly:
    // no bytes lost, none duplicated.
    let step = decoder.step(Some(b"bc 5\n".as_slice())).unwrap();
    assert_eq!(
        step,
        Step::Field(Field::Int {
            name: "abc".into(),
            value: 5
        })
    );
    assert_eq!(decoder.step(None).unwrap(), Step::Done);
}

#[test]
fn starvation_without_new_bytes_is_terminal() {
    let mut decoder = StepDecoder::with_bytes(b":i a 4".as_slice());
    assert_eq!(decoder.step(None).unwrap(), Step::NeedData);
    let error = decoder.step(None).unwrap_err();
    assert!(error.is_starvation());
    // The decoder stays poisoned afterwards.
    assert_eq!(decoder.step(Some(b"2\n".as_slice())).unwrap_err(), error);
}

#[test]
fn done_is_stable() {
    let mut decoder = StepDecoder::with_bytes(b":i a 1\n".as_slice());
    assert!(matches!(decoder.step(None).unwrap(), Step::Field(_)));
    assert_eq!(decoder.step(None).unwrap(), Step::Done);
    assert_eq!(decoder.step(None).unwrap(), Step::Done);
    assert_eq!(decoder.record().get("a").unwrap().first().as_int(), Some(1));
}

#[test]
fn bytes_may_be_injected_after_a_successful_decode() {
    let mut decoder = StepDecoder::with_bytes(b":i a 1\n".as_slice());
    assert!(matches!(decoder.step(None).unwrap(), Step::Field(_)));
    assert!(matches!(
        decoder.step(Some(b":i b 2\n".as_slice())).unwrap(),
        Step::Field(_)
    ));
    assert_eq!(decoder.step(None).unwrap(), Step::Done);
    assert_eq!(decoder.into_record().len(), 2);
}

#[test]
fn grammar_errors_do_not_get_a_retry() {
    let mut decoder = StepDecoder::with_bytes(b":i a 1x\n".as_slice());
    let error = decoder.step(None).unwrap_err();
    assert_eq!(
        error,
        ParseError::UnexpectedByte {
            expected: b'\n',
            received: b'x'
        }
    );
    assert_eq!(
        decoder.step(Some(b":i b 2\n".as_slice())).unwrap_err(),
        error
    );
}

#[test]
fn push_and_pull_surfaces_agree() {
    let payload: &[u8] = b":i a 1\n:b blob 6\nx\ny\nz\n:i a 2\n";
    for parts in [1, 2, 4, 9, payload.len()] {
        let chunks = produce_chunks(payload, parts);

        let mut push = StreamingDecoder::new();
        for chunk in &chunks {
            push.feed(chunk).unwrap();
        }
        let pushed = push.finish().unwrap();

        let mut pull = StepDecoder::new();
        let mut pending = chunks.iter();
        let mut inject: Option<&[u8]> = pending.next().copied();
        loop {
            match pull.step(inject.take()).unwrap() {
                Step::Field(_) => {}
                Step::NeedData | Step::Done => match pending.next() {
                    Some(chunk) => inject = Some(*chunk),
                    None => break,
                },
            }
        }
        let pulled = pull.into_record();

        assert_eq!(pushed, pulled, "divergence at {parts} parts");
    }
}

#[test]
fn synchronous_drain_matches_the_incremental_surfaces() {
    let payload: &[u8] = b":i a 1\n:b b 3\nxyz\n";
    let mut push = StreamingDecoder::new();
    push.feed(payload).unwrap();
    assert_eq!(decode_record(payload).unwrap(), push.finish().unwrap());
}
