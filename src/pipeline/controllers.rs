//! Non-learning controllers for evaluation and experiments

use crate::{
    ports::Controller,
    q_learning::QTable,
    types::{Action, DiscreteState},
};

/// Plays the greedy policy of a fixed table and never updates it.
#[derive(Debug, Clone)]
pub struct FrozenController {
    name: String,
    q_table: QTable,
}

impl FrozenController {
    pub fn new(name: impl Into<String>, q_table: QTable) -> Self {
        Self {
            name: name.into(),
            q_table,
        }
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }
}

impl Controller for FrozenController {
    fn select_action(&mut self, state: DiscreteState) -> Action {
        self.q_table.greedy_action(state)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn q_table(&self) -> Option<&QTable> {
        Some(&self.q_table)
    }
}

/// Wraps a closure policy; handy for hand-written strategies and tests.
pub struct ScriptedController<F> {
    name: String,
    policy: F,
}

impl<F> ScriptedController<F>
where
    F: FnMut(DiscreteState) -> Action + Send,
{
    pub fn new(name: impl Into<String>, policy: F) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }
}

impl<F> Controller for ScriptedController<F>
where
    F: FnMut(DiscreteState) -> Action + Send,
{
    fn select_action(&mut self, state: DiscreteState) -> Action {
        (self.policy)(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
