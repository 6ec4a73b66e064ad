mod buffer;
mod encode;
mod stepping;
