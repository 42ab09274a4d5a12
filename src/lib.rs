#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use classify_reflect as reflect;
pub use classify_tree as tree;
pub use classify_utils as utils;

pub use classify_reflect::{Classifier, Classify, ClassifyError, DeferredRef, Node, Parent};
