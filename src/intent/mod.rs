//! Declarative analysis intents built on the table operations in
//! [`crate::engine::ops`].

pub mod slice_compare;

pub use slice_compare::{
    SliceCompareColumn, SliceCompareOptions, SliceCompareQuery, slice_compare,
};

#[cfg(test)]
mod slice_compare_test;
