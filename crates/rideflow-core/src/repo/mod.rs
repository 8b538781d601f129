pub mod definition;
pub mod instance;

pub use definition::{build_flow_definition, FlowDefinition};
pub use instance::{ActionRecord, FlowInstance, FlowPosition};
