use crate::ScanBuffer;

#[test]
fn peek_and_advance() {
    let mut buf = ScanBuffer::from_bytes(b"abc");
    assert_eq!(buf.current(), Some(b'a'));
    assert_eq!(buf.peek(2), b"ab");
    assert_eq!(buf.advance(), Some(b'a'));
    assert_eq!(buf.current(), Some(b'b'));
    assert_eq!(buf.advance(), Some(b'b'));
    assert_eq!(buf.advance(), Some(b'c'));
    assert!(buf.is_eof());
    assert_eq!(buf.advance(), None);
    assert_eq!(buf.current(), None);
}

#[test]
fn take_consumes_and_may_come_up_short() {
    let mut buf = ScanBuffer::from_bytes(b"abcdef");
    assert_eq!(buf.take(4), b"abcd");
    // Short read: only two bytes remain.
    assert_eq!(buf.take(5), b"ef");
    assert!(buf.is_eof());
}

#[test]
fn append_disturbs_neither_cursor_nor_saves() {
    let mut buf = ScanBuffer::from_bytes(b"ab");
    buf.advance();
    buf.save();
    buf.append(b"cd");
    assert_eq!(buf.current(), Some(b'b'));
    assert_eq!(buf.remaining(), b"bcd");
    buf.advance();
    buf.advance();
    buf.restore();
    assert_eq!(buf.remaining(), b"bcd");
}

#[test]
fn save_points_nest_with_stack_discipline() {
    let mut buf = ScanBuffer::from_bytes(b"abcdef");
    buf.save();
    buf.advance();
    buf.advance();
    buf.save();
    buf.advance();
    assert_eq!(buf.current(), Some(b'd'));
    buf.restore();
    assert_eq!(buf.current(), Some(b'c'));
    buf.restore();
    assert_eq!(buf.current(), Some(b'a'));
}

#[test]
fn discard_save_keeps_position() {
    let mut buf = ScanBuffer::from_bytes(b"abc");
    buf.save();
    buf.advance();
    buf.discard_save();
    assert_eq!(buf.current(), Some(b'b'));
}

#[test]
fn evict_shifts_cursor() {
    let mut buf = ScanBuffer::from_bytes(b"abcdef");
    buf.advance();
    buf.advance();
    buf.advance();
    buf.evict();
    assert_eq!(buf.offset(), 0);
    assert_eq!(buf.remaining(), b"def");
    assert_eq!(buf.advance(), Some(b'd'));
}

#[test]
fn evict_clamps_at_live_save_point() {
    let mut buf = ScanBuffer::from_bytes(b"abcdef");
    buf.advance();
    buf.advance();
    buf.save();
    buf.advance();
    buf.advance();
    // The request covers the whole consumed prefix, but the save point at
    // offset 2 must survive.
    buf.evict();
    assert_eq!(buf.remaining(), b"ef");
    buf.restore();
    assert_eq!(buf.remaining(), b"cdef");
}

#[test]
fn restore_append_cycle_preserves_logical_content() {
    let mut buf = ScanBuffer::from_bytes(b":i ab");
    buf.save();
    while buf.advance().is_some() {}
    buf.restore();
    buf.append(b"c 5\n");
    assert_eq!(buf.remaining(), b":i abc 5\n");
}
