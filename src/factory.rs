use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use tracing::debug;

use crate::context::{build_scope, ExportSlot};
use crate::{Context, Export, Scope};

/// Binds child scope factories against one parent export type. Reusable; every
/// bound [`Factory`] reads the sealed export of the scope this maker came from.
pub struct FactoryMaker<E>
where
    E: Export,
{
    slot: ExportSlot<E>,
}

impl<E> FactoryMaker<E>
where
    E: Export,
{
    #[inline(always)]
    pub(crate) fn new(slot: ExportSlot<E>) -> Self {
        Self { slot }
    }

    pub fn bind<R, C, F>(&self, factory: F) -> Factory<R>
    where
        R: 'static,
        C: Export<Parent = E>,
        F: Fn(Context<C>) -> Scope<R, C> + 'static,
    {
        debug!(child = std::any::type_name::<C>(), "bind deferred factory");
        let slot = Rc::clone(&self.slot);
        Factory::new(move || {
            let export = slot.get().unwrap_or_else(|| {
                panic!(
                    "deferred child built before `{}` was sealed; \
                     build only after the owning scope factory has returned",
                    std::any::type_name::<E>()
                )
            });
            build_scope(Rc::clone(export), &factory)
        })
    }
}

impl<E> Clone for FactoryMaker<E>
where
    E: Export,
{
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

/// A deferred child builder. Each call to [`Factory::build`] runs the bound
/// factory afresh; nothing is cached between builds.
pub struct Factory<R> {
    build: Rc<dyn Fn() -> R>,
}

impl<R> Factory<R> {
    #[inline(always)]
    pub(crate) fn new<F>(build: F) -> Self
    where
        F: Fn() -> R + 'static,
    {
        Self {
            build: Rc::new(build),
        }
    }

    pub fn build(&self) -> R {
        (self.build)()
    }
}

impl<R> Clone for Factory<R> {
    fn clone(&self) -> Self {
        Self {
            build: Rc::clone(&self.build),
        }
    }
}

impl<R> Debug for Factory<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Factory<{}>", std::any::type_name::<R>())
    }
}
