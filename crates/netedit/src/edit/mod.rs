//! Editing one interface's configuration.
//!
//! A [`PendingEdit`] holds the operator's raw input. [`validate`] checks it
//! and, if it passes, [`normalize`]s it into a [`CanonicalRequest`] that
//! can be handed to an applier. [`advise`] reports non-blocking warnings
//! and [`RequestDiff`] shows what a request would change.
//!
//! # Example
//!
//! ```
//! use netedit::edit::{PendingEdit, RequestDiff};
//! use netedit::interface::Interface;
//!
//! let observed = Interface::new("eth0").manual("10.0.0.5", "255.255.255.0");
//! let mut edit = PendingEdit::seed(&observed);
//! edit.gateway = "10.0.0.1".into();
//! edit.routes = "192.168.0.0/16".into();
//!
//! let request = edit.validate().unwrap();
//! let diff = RequestDiff::between(&observed, &request);
//! assert_eq!(diff.summary(), "+ gateway 10.0.0.1\n+ route 192.168.0.0/16");
//! ```

mod advise;
mod diff;
mod normalize;
mod pending;
mod request;
mod validate;

pub use advise::{Advisory, advise};
pub use diff::{FieldChange, RequestDiff};
pub use normalize::normalize;
pub(crate) use normalize::split_list;
pub use pending::PendingEdit;
pub use request::CanonicalRequest;
pub use validate::{ValidationFailure, check, validate};
