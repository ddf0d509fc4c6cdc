//! Effect tags: typed markers identifying one requested operation.
//!
//! A tag is the inert description of a single effect invocation. It carries
//! the operation's payload (for example the value to log) and is statically
//! bound, through [`TypedTag::Result`], to the one type an interpreter must
//! supply to resume the computation. There is no central registry of effect
//! identifiers: a tag is recognized by structurally matching its concrete
//! type with [`Continuation::extract`](super::Continuation::extract).

use std::any::Any;
use std::fmt;

/// Marker trait for effect-row types.
///
/// An effect row declares which effect families a computation may request.
/// A row is an ordinary zero-sized type implementing this trait together
/// with the capability traits of the families it grants:
///
/// ```rust
/// use effree::effect::{Effects, Reader, Writer};
///
/// struct AppEffects;
///
/// impl Effects for AppEffects {}
/// impl Reader<u16> for AppEffects {}
/// impl Writer<String> for AppEffects {}
/// ```
pub trait Effects: 'static {}

/// The empty effect row: computations over it can request nothing and are
/// therefore always [`Pure`](super::Eff::is_pure) once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoEffects;

impl Effects for NoEffects {}

/// A marker identifying one concrete invocation of one effect operation.
///
/// Interpreters recognize tags by their concrete type; anything else is
/// forwarded outward unchanged. The `name` is used only for diagnostics
/// (debug rendering and unhandled-effect reports).
pub trait EffectTag: Any {
    /// A short diagnostic name, e.g. `"Ask"` or `"Tell"`.
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn EffectTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// An effect tag statically bound to the type its resolution must produce.
///
/// The binding is the sole type-safety mechanism of the tag protocol: a
/// result value can only be supplied through
/// [`Resumption::resume`](super::Resumption::resume), whose parameter type
/// is `Self::Result`, and a `Resumption` can only be obtained by matching
/// the tag's concrete type.
pub trait TypedTag: EffectTag + Sized {
    /// The type an interpreter must supply to resume past this tag.
    type Result: 'static;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Probe;

    impl EffectTag for Probe {
        fn name(&self) -> &'static str {
            "Probe"
        }
    }

    impl TypedTag for Probe {
        type Result = u8;
    }

    #[rstest]
    fn tag_debug_prints_name() {
        let tag: Box<dyn EffectTag> = Box::new(Probe);
        assert_eq!(format!("{tag:?}"), "Probe");
    }

    #[rstest]
    fn tag_identity_is_concrete_type() {
        let tag: Box<dyn EffectTag> = Box::new(Probe);
        let any: &dyn std::any::Any = &*tag;
        assert!(any.is::<Probe>());
    }

    #[rstest]
    fn no_effects_is_copy_and_eq() {
        let row = NoEffects;
        let copied = row;
        assert_eq!(row, copied);
    }
}
