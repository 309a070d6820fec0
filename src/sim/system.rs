use super::context::TickContext;

/// What a system runs over during one yearly step.
///
/// All civilization-scoped systems run for the first civilization, then
/// all of them for the second, and so on; world-scoped systems run once
/// afterwards, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemScope {
    /// Once per civilization, with `ctx.focus` set.
    Civilization,
    /// Once per year over every civilization and the world grid.
    World,
}

/// A pluggable simulation system that runs each year.
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>`.
pub trait SimSystem {
    fn name(&self) -> &str;
    fn scope(&self) -> SystemScope;
    fn tick(&mut self, ctx: &mut TickContext);
}
