use std::ops::Deref;
use std::rc::Rc;

/// An export record: the typed set of capabilities a scope makes visible to
/// its descendants, chained to the record of the scope above it.
pub trait Export: 'static {
    type Parent: 'static;

    fn parent(&self) -> &Self::Parent;
}

impl Export for () {
    type Parent = ();

    fn parent(&self) -> &() {
        &()
    }
}

/// Pass-through record for scopes that add no capabilities of their own.
pub struct EmptyExport<P> {
    parent: Rc<P>,
}

impl<P> EmptyExport<P>
where
    P: 'static,
{
    #[inline(always)]
    pub fn new(parent: Rc<P>) -> Self {
        Self { parent }
    }
}

impl<P> Export for EmptyExport<P>
where
    P: 'static,
{
    type Parent = P;

    fn parent(&self) -> &P {
        &self.parent
    }
}

impl<P> Deref for EmptyExport<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.parent
    }
}
