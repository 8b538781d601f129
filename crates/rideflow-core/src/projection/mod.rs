//! Proyección terminal (receipt) de un flujo completado.

mod receipt;

pub use receipt::{reference_for, ReceiptLine, ReceiptProjection, ReceiptProjector, SummaryProjector};
