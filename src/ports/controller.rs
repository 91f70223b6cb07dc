//! Controller port - abstraction over whatever decides each step's action
//!
//! The episode runner only ever asks for an [`Action`] given the current
//! discrete state. Whether that action comes from a learning agent, a frozen
//! policy, or a scripted one is the controller's business.

use crate::{
    Result,
    q_learning::QTable,
    types::{Action, DiscreteState, Transition},
};

/// Controller trait - unified interface for action sources
///
/// # Examples
///
/// ```no_run
/// use flappy_ql::{
///     ports::Controller,
///     types::{Action, DiscreteState},
/// };
///
/// struct AlwaysJump;
///
/// impl Controller for AlwaysJump {
///     fn select_action(&mut self, _state: DiscreteState) -> Action {
///         Action::Jump
///     }
///
///     fn name(&self) -> &str {
///         "always-jump"
///     }
/// }
/// ```
pub trait Controller: Send {
    /// Choose the action for the given state.
    fn select_action(&mut self, state: DiscreteState) -> Action;

    /// Observe the outcome of the step that followed `select_action`.
    ///
    /// Learning controllers apply their update here. The default does nothing,
    /// which suits frozen and scripted controllers.
    fn observe(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Get the controller's name.
    ///
    /// Used for identification in summaries and logging.
    fn name(&self) -> &str;

    /// Expose the controller's action-value table, if it has one.
    fn q_table(&self) -> Option<&QTable> {
        None
    }
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn select_action(&mut self, state: DiscreteState) -> Action {
        (**self).select_action(state)
    }

    fn observe(&mut self, transition: &Transition) -> Result<()> {
        (**self).observe(transition)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn q_table(&self) -> Option<&QTable> {
        (**self).q_table()
    }
}
