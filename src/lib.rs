mod export;
pub use export::{EmptyExport, Export};

mod scope;
pub use scope::Scope;

mod context;
pub use context::{build_root, Context};

mod factory;
pub use factory::{Factory, FactoryMaker};

mod stream;
pub use stream::{MutableStream, Stream, Subscriber, SubscriberId, ValueStream};
