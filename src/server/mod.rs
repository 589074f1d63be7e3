pub mod protocol;
pub mod stdio;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
pub use stdio::StdioServer;
