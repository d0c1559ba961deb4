//! Operator state machines.
//!
//! Every operator is a [`Producer`](crate::Producer): a recipe holding its
//! upstream [`Observable`](crate::Observable) and parameters, paired with a
//! sink type that embeds a [`Sink`](crate::Sink) and observes upstream.
//! Operators are usually reached through the methods of `Observable`.

mod amb;
mod any;
mod count;
mod filter;
mod first;
mod is_empty;
mod map;
mod sum;
mod to_vec;

pub use self::amb::{Amb, AmbSink};
pub use self::any::{All, AllSink, Any, AnySink};
pub use self::count::{Count, CountSink};
pub use self::filter::{Filter, FilterSink};
pub use self::first::{DefaultIfEmpty, DefaultIfEmptySink, First, FirstSink};
pub use self::is_empty::{IsEmpty, IsEmptySink};
pub use self::map::{Map, MapSink, TryMap, TryMapSink};
pub use self::sum::{Sum, SumSink, Summand};
pub use self::to_vec::{ToVec, ToVecSink};
