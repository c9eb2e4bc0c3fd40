/// One node of the composition graph: the value a scope factory produced plus
/// the export record it seals for its descendants.
pub struct Scope<R, E> {
    pub(crate) result: R,
    pub(crate) export: E,
}

impl<R, E> Scope<R, E> {
    #[inline(always)]
    pub fn new(result: R, export: E) -> Self {
        Self { result, export }
    }
}
