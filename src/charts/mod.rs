pub mod anim;
pub mod bar;
pub mod gauge;

/// How a chart segment is painted. Stripe is the diagonal-hatch pattern used
/// for pending / below-target segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Stripe,
}
