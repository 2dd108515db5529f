pub mod classify;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod links;
pub mod result;
pub mod words;

pub use classify::{Classifier, ClassifierOptions};
pub use dom::{NodeKind, Page, PageNode};
pub use error::{ErrorKind, ScanError};
pub use fetch::Fetcher;
pub use links::LinkOptions;
pub use result::{ExternalResource, FetchedPage, PageResources, ResourceKind, WordFrequency};
pub use words::CounterOptions;
