use std::cell::OnceCell;
use std::ops::Deref;
use std::rc::Rc;

use tracing::debug;

use crate::factory::FactoryMaker;
use crate::{Export, Scope};

pub(crate) type ExportSlot<E> = Rc<OnceCell<Rc<E>>>;

/// Read view handed to a scope factory for the duration of one invocation.
///
/// Derefs to the parent export record, so parent capabilities are reachable by
/// field access; grandparent capabilities chain through [`Export::parent`].
pub struct Context<E>
where
    E: Export,
{
    parent: Rc<E::Parent>,
    slot: ExportSlot<E>,
}

impl<E> Context<E>
where
    E: Export,
{
    #[inline(always)]
    pub(crate) fn new(parent: Rc<E::Parent>, slot: ExportSlot<E>) -> Self {
        Self { parent, slot }
    }

    #[inline(always)]
    pub fn parent_export(&self) -> Rc<E::Parent> {
        Rc::clone(&self.parent)
    }

    #[inline(always)]
    pub fn factory_maker(&self) -> FactoryMaker<E> {
        FactoryMaker::new(Rc::clone(&self.slot))
    }
}

impl<E> Deref for Context<E>
where
    E: Export,
{
    type Target = E::Parent;

    fn deref(&self) -> &E::Parent {
        &self.parent
    }
}

/// Builds the root scope and returns its produced value. The root export is
/// sealed for the root's own deferred children and otherwise discarded.
pub fn build_root<R, E, F>(factory: F) -> R
where
    E: Export<Parent = ()>,
    F: Fn(Context<E>) -> Scope<R, E>,
{
    build_scope(Rc::new(()), &factory)
}

pub(crate) fn build_scope<R, E, F>(parent: Rc<E::Parent>, factory: &F) -> R
where
    E: Export,
    F: Fn(Context<E>) -> Scope<R, E>,
{
    debug!(export = std::any::type_name::<E>(), "build scope");
    let slot: ExportSlot<E> = Rc::new(OnceCell::new());
    let ctx = Context::new(parent, Rc::clone(&slot));
    let scope = factory(ctx);
    let _ = slot.set(Rc::new(scope.export));
    scope.result
}
