pub mod message_router;
pub mod stream_handler;

pub use message_router::handle_message;
pub use stream_handler::{run_stream, StreamEnd, StreamSink};
