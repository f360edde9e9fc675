//! # flatsbe Conformance
//!
//! Accessors generated at build time for a sample `car` schema, compiled
//! against `flatsbe-core` and exercised by the tests below.
//!
//! The schema declares a four-field message header, the `Color`, `Model`,
//! `Direction` and `BoostType` enumerations, the `OptionalExtras` set and the
//! `Booster` and `Engine` composites.

/// Generated units, one module per unit.
#[allow(clippy::upper_case_acronyms)]
pub mod generated {
    macro_rules! unit {
        ($module:ident, $file:literal) => {
            pub mod $module {
                include!(concat!(env!("OUT_DIR"), "/", $file));
            }
            pub use $module::*;
        };
    }

    unit!(message_header, "message_header.rs");
    unit!(color, "color.rs");
    unit!(model, "model.rs");
    unit!(direction, "direction.rs");
    unit!(boost_type, "boost_type.rs");
    unit!(optional_extras, "optional_extras.rs");
    unit!(booster, "booster.rs");
    unit!(engine, "engine.rs");
}

pub use generated::*;
