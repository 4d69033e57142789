#![forbid(unsafe_code)]

//! Change-notifying values.
//!
//! [`Observable`] holds a value shared between a media query and the widgets
//! listening to it; [`Subscription`] detaches its callback when dropped.
//!
//! Everything here is `Rc`-based and stays on the UI thread.
//!
//! Guarantees:
//! - the version advances once per write that changes the value;
//! - writing an equal value notifies nobody;
//! - callbacks run in the order they subscribed;
//! - a dropped [`Subscription`] is never called again.

pub mod observable;

pub use observable::{Observable, Subscription};
