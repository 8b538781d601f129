/// Estado de un Step visto desde la UI (indicador de progreso).
///
/// Derivado de la posición del flujo y del log de acciones; no se almacena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Aún no alcanzado.
    Pending,
    /// Step actual, esperando datos del usuario.
    Current,
    /// Step actual con una acción asíncrona en curso.
    AwaitingAction,
    /// Superado.
    Completed,
}
