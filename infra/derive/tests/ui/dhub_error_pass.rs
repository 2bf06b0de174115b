use dhub_derive::dhub_error;
use std::borrow::Cow;

#[dhub_error]
pub enum DemoError {
    #[error("Payload is empty")]
    Empty,

    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    assert_eq!(DemoError::Empty.kind(), "Empty");
}
