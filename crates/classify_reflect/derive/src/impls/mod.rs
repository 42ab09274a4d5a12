// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;
mod trait_classify;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_classify::impl_trait_classify;
use trait_type_path::impl_trait_type_path;
use trait_typed::impl_trait_typed;

pub(crate) use enum_kind::impl_enum;
pub(crate) use struct_kind::impl_struct;
