//! The calculator session: the state a host embeds and drives with commands.

use crate::{
    edit::{CycleDirection, Direction, EditError, EditState},
    evaluable::to_evaluable,
    key::{Command, Key},
    node::{NodeId, NodeKind},
    options::CalculatorOptions,
    render::render,
    tree::Tree,
};
use mathpad_compute::{
    solve::{self, CalcError},
    Ctxt,
    Evaluator,
};
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A successful calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryEntry {
    /// The evaluable text that was calculated.
    pub input: String,

    /// The formatted result.
    pub output: String,
}

/// A calculator session.
///
/// Every edit command is applied to a copy of the current [`EditState`], which replaces the
/// current state only if the command succeeds. Commands that fail, such as ones naming a node
/// that does not exist, are logged and ignored. Edits that change the tree can be undone.
#[derive(Debug)]
pub struct Calculator<E: Evaluator = Ctxt> {
    evaluator: E,
    options: CalculatorOptions,
    state: EditState,
    undo: VecDeque<EditState>,
    redo: Vec<EditState>,
    hover: Option<NodeId>,
    result: Option<String>,
    history: Vec<HistoryEntry>,
    last_error: Option<CalcError>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with the default evaluator and options.
    pub fn new() -> Self {
        Self::with_evaluator(Ctxt::default(), CalculatorOptions::default())
    }

    /// Creates a calculator with the default evaluator and the given options.
    pub fn with_options(options: CalculatorOptions) -> Self {
        Self::with_evaluator(Ctxt::default(), options)
    }
}

impl<E: Evaluator> Calculator<E> {
    /// Creates a calculator that evaluates with the given backend.
    pub fn with_evaluator(evaluator: E, options: CalculatorOptions) -> Self {
        Self {
            evaluator,
            options,
            state: EditState::new(),
            undo: VecDeque::new(),
            redo: Vec::new(),
            hover: None,
            result: None,
            history: Vec::new(),
            last_error: None,
        }
    }

    /// The evaluator backend.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CalculatorOptions) {
        self.options = options;
        self.trim_undo();
        self.trim_history();
    }

    fn trim_undo(&mut self) {
        while self.undo.len() > self.options.undo_depth {
            self.undo.pop_front();
        }
    }

    fn trim_history(&mut self) {
        if let Some(limit) = self.options.history_limit {
            let excess = self.history.len().saturating_sub(limit);
            self.history.drain(..excess);
        }
    }

    /// Forgets the hovered node if it no longer exists.
    fn drop_dangling_hover(&mut self) {
        if self.hover.is_some_and(|id| !self.state.tree().contains(id)) {
            self.hover = None;
        }
    }

    /// Applies an edit to a copy of the current state, and commits the copy if the edit succeeds.
    fn apply(
        &mut self,
        command: &'static str,
        edit: impl FnOnce(&mut EditState) -> Result<(), EditError>,
    ) -> bool {
        let mut next = self.state.clone();
        if let Err(err) = edit(&mut next) {
            warn!(command, %err, "ignored command");
            return false;
        }
        debug_assert_eq!(next.check_invariants(), Ok(()), "`{}` broke the tree", command);

        let previous = std::mem::replace(&mut self.state, next);
        if !previous.tree().same_structure(self.state.tree()) {
            self.undo.push_back(previous);
            self.trim_undo();
            self.redo.clear();
        }
        self.drop_dangling_hover();

        debug!(
            command,
            active = ?self.state.active(),
            nodes = self.state.tree().len(),
            "committed command",
        );
        true
    }

    /// Inserts a number, operator or variable. Returns false if the command was ignored.
    pub fn insert_literal(&mut self, kind: NodeKind, value: &str) -> bool {
        self.apply("insert_literal", |state| state.insert_literal(kind, value))
    }

    /// Inserts a structure: a fraction, power, square root, superscript, subscript, parentheses
    /// ([`NodeKind::Group`]) or a function with the given name.
    pub fn insert_structure(&mut self, kind: NodeKind, function_name: Option<&str>) -> bool {
        self.apply("insert_structure", |state| state.insert_structure(kind, function_name))
    }

    /// Replaces an active `/` operator with a fraction.
    pub fn division_to_fraction(&mut self) -> bool {
        self.apply("division_to_fraction", EditState::division_to_fraction)
    }

    /// Adds an argument to the enclosing function.
    pub fn insert_argument(&mut self) -> bool {
        self.apply("insert_argument", EditState::insert_argument)
    }

    /// Starts a new line of the expression, for entering a system of equations.
    pub fn insert_separator(&mut self) -> bool {
        self.apply("insert_separator", EditState::insert_separator)
    }

    /// Deletes the active node.
    pub fn delete(&mut self) -> bool {
        self.apply("delete", EditState::delete)
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.apply("navigate", |state| state.navigate(direction))
    }

    pub fn cycle(&mut self, direction: CycleDirection) -> bool {
        self.apply("cycle", |state| state.cycle(direction))
    }

    pub fn close_paren(&mut self) -> bool {
        self.apply("close_paren", EditState::close_paren)
    }

    /// Makes the given node active, as if the user clicked it.
    pub fn set_active(&mut self, id: NodeId) -> bool {
        self.apply("set_active", |state| state.set_active(id))
    }

    /// Makes the given node active with the caret at the given offset.
    pub fn set_active_at(&mut self, id: NodeId, offset: usize) -> bool {
        self.apply("set_active_at", |state| state.set_active_at(id, offset))
    }

    /// Highlights the given node, or clears the highlight.
    pub fn set_hover(&mut self, id: Option<NodeId>) -> bool {
        match id {
            Some(id) if !self.state.tree().contains(id) => {
                warn!(command = "set_hover", %id, "ignored command");
                false
            },
            id => {
                self.hover = id;
                true
            },
        }
    }

    /// Clears the expression and the result. The history is kept, and the clear can be undone.
    pub fn clear(&mut self) {
        self.apply("clear", |state| {
            state.clear();
            Ok(())
        });
        self.hover = None;
        self.result = None;
        self.last_error = None;
    }

    /// Restores the state before the last edit that changed the tree. Returns false if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.state, previous);
        self.redo.push(current);
        self.drop_dangling_hover();
        debug!(remaining = self.undo.len(), "undo");
        true
    }

    /// Reapplies the last undone edit. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.state, next);
        self.undo.push_back(current);
        self.trim_undo();
        self.drop_dangling_hover();
        debug!(remaining = self.redo.len(), "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Calculates the expression and returns the result to display: the formatted answer, or a
    /// short error message. Successful calculations are appended to the history. The tree is
    /// never changed.
    #[instrument(skip(self))]
    pub fn calculate(&mut self) -> &str {
        let input = self.to_evaluable_string();
        let output = match solve::calculate(&input, &self.evaluator) {
            Ok(answer) => {
                let output = answer.formatted(self.options.format).to_string();
                debug!(%input, %output, "calculated");
                self.history.push(HistoryEntry { input, output: output.clone() });
                self.trim_history();
                self.last_error = None;
                output
            },
            Err(err) => {
                debug!(%input, error = %err.error, "calculation failed");
                let output = err.to_string();
                self.last_error = Some(err);
                output
            },
        };
        self.result.insert(output).as_str()
    }

    /// Runs a command. Returns false if the command was ignored.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::InsertLiteral { kind, value } => self.insert_literal(kind, &value),
            Command::InsertStructure { kind, function } => {
                self.insert_structure(kind, function.as_deref())
            },
            Command::DivisionToFraction => self.division_to_fraction(),
            Command::InsertArgument => self.insert_argument(),
            Command::InsertSeparator => self.insert_separator(),
            Command::Delete => self.delete(),
            Command::Navigate(direction) => self.navigate(direction),
            Command::Cycle(direction) => self.cycle(direction),
            Command::CloseParen => self.close_paren(),
            Command::Calculate => {
                self.calculate();
                true
            },
        }
    }

    /// Runs the command bound to a key. Returns false if the key has no binding or the command
    /// was ignored.
    pub fn key(&mut self, key: Key) -> bool {
        match key.command(&self.state) {
            Some(command) => self.execute(command),
            None => {
                debug!(?key, "unbound key");
                false
            },
        }
    }

    /// Renders the expression to LaTeX, with the caret and hover highlight.
    pub fn render_markup(&self) -> String {
        render(self.state.tree(), self.state.active(), self.hover, self.options.render)
    }

    /// Converts the expression to the text given to the evaluator.
    pub fn to_evaluable_string(&self) -> String {
        to_evaluable(self.state.tree())
    }

    /// The result of the last calculation, if the expression was calculated since it was last
    /// cleared.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The error of the last calculation, if it failed.
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn tree(&self) -> &Tree {
        self.state.tree()
    }

    pub fn active(&self) -> Option<NodeId> {
        self.state.active()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.state.selected()
    }

    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use mathpad_compute::solve::CalcErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Presses each key in order.
    fn keys(calculator: &mut Calculator, keys: &str) {
        for c in keys.chars() {
            calculator.key(Key::Char(c));
        }
    }

    #[test]
    fn fraction_end_to_end() {
        let mut calculator = Calculator::new();
        assert!(calculator.insert_structure(NodeKind::Fraction, None));
        let fraction = calculator.tree().children(NodeId::ROOT)[0];
        let numerator = calculator.tree().children(fraction)[0];
        assert_eq!(calculator.active(), Some(numerator));

        assert!(calculator.insert_literal(NodeKind::Number, "1"));
        assert!(calculator.navigate(Direction::Right));
        let denominator = calculator.tree().children(fraction)[1];
        assert_eq!(calculator.active(), Some(denominator));
        assert!(calculator.insert_literal(NodeKind::Number, "2"));

        assert_eq!(calculator.to_evaluable_string(), "(1)/(2)");
        assert_eq!(calculator.calculate(), "0.5");
        assert_eq!(calculator.result(), Some("0.5"));
        assert_eq!(calculator.history(), &[HistoryEntry {
            input: "(1)/(2)".to_string(),
            output: "0.5".to_string(),
        }]);
    }

    #[test]
    fn arithmetic_from_keys() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "3+4*2");
        assert_eq!(calculator.to_evaluable_string(), "3+4*2");
        calculator.key(Key::Enter);
        assert_eq!(calculator.result(), Some("11"));
    }

    #[test]
    fn multi_digit_numbers() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "12.5*2");
        let value = calculator.evaluator().evaluate_numeric(&calculator.to_evaluable_string()).unwrap();
        assert_float_relative_eq!(value, 25.0);
    }

    #[test]
    fn solves_equations() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "2x+3=7");
        assert_eq!(calculator.calculate(), "x = 2");

        calculator.clear();
        calculator.key(Key::Char('^'));
        keys(&mut calculator, "x");
        calculator.key(Key::Right);
        keys(&mut calculator, "2");
        calculator.key(Key::Up);
        keys(&mut calculator, "-5x+6=0");
        assert_eq!(calculator.to_evaluable_string(), "(x)^(2)-5x+6=0");
        assert_eq!(calculator.calculate(), "x = 3, x = 2");
    }

    #[test]
    fn unevaluated_expressions() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "x+1");
        assert_eq!(calculator.calculate(), "x+1");
        assert_eq!(calculator.history().len(), 1);
    }

    #[test]
    fn failures_keep_the_tree() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "3+");
        let before = calculator.state().clone();

        assert_eq!(calculator.calculate(), "Invalid expression");
        assert_eq!(calculator.state(), &before);
        assert_eq!(calculator.last_error().map(|err| err.kind), Some(CalcErrorKind::InvalidExpression));
        assert!(calculator.history().is_empty());

        keys(&mut calculator, "1");
        calculator.calculate();
        assert!(calculator.last_error().is_none());
    }

    #[test]
    fn empty_tree_reports() {
        let mut calculator = Calculator::new();
        assert_eq!(calculator.calculate(), "Invalid expression");

        let err = calculator.last_error().unwrap();
        let report = err.report();
        assert!(report.contains(&err.error.to_string()));
    }

    #[test]
    fn system_from_keys() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "x+y=3;x-y=1");
        assert_eq!(calculator.to_evaluable_string(), "x+y=3\nx-y=1");
        assert_eq!(calculator.render_markup(), r"x+y=3\newline x-y=1\textcolor{blue}{|}");
        assert_eq!(calculator.calculate(), "x = 2, y = 1");
    }

    #[test]
    fn system_with_fractions() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "2x+y=");
        calculator.insert_structure(NodeKind::Fraction, None);
        keys(&mut calculator, "7");
        calculator.navigate(Direction::Right);
        keys(&mut calculator, "2;x-y=1");
        assert_eq!(calculator.to_evaluable_string(), "2x+y=(7)/(2)\nx-y=1");
        assert_eq!(calculator.calculate(), "x = 1.5, y = 0.5");
    }

    #[test]
    fn malformed_number() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "1.2.3");
        assert_eq!(calculator.to_evaluable_string(), "1.2.3");
        assert_eq!(calculator.calculate(), "Invalid expression");
        assert!(calculator.history().is_empty());
    }

    #[test]
    fn failed_equation_reports() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "x=");
        assert_eq!(calculator.calculate(), "Invalid expression");
        assert!(!calculator.last_error().unwrap().report().is_empty());
    }

    #[test]
    fn function_calls() {
        let mut calculator = Calculator::new();
        calculator.insert_structure(NodeKind::Function, Some("max"));
        keys(&mut calculator, "3,7");
        assert_eq!(calculator.to_evaluable_string(), "max(3,7)");
        assert_eq!(calculator.calculate(), "7");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "1");
        let before = calculator.state().clone();
        assert!(!calculator.set_active(NodeId(1000)));
        assert!(!calculator.set_active_at(NodeId(1000), 0));
        assert!(!calculator.set_hover(Some(NodeId(1000))));
        assert_eq!(calculator.state(), &before);
        assert_eq!(calculator.hover(), None);
    }

    #[test]
    fn undo_and_redo() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "1+2");
        assert!(calculator.can_undo());

        // moving the caret is not an edit
        calculator.navigate(Direction::Left);
        assert!(calculator.undo());
        assert_eq!(calculator.to_evaluable_string(), "1+");
        assert!(calculator.undo());
        assert!(calculator.undo());
        assert_eq!(calculator.to_evaluable_string(), "");
        assert!(!calculator.undo());

        assert!(calculator.redo());
        assert_eq!(calculator.to_evaluable_string(), "1");

        // a new edit drops the redo stack
        keys(&mut calculator, "0");
        assert!(!calculator.can_redo());
        assert_eq!(calculator.to_evaluable_string(), "10");
    }

    #[test]
    fn undo_depth_is_bounded() {
        let options = CalculatorOptions::default().into_builder().undo_depth(2).build();
        let mut calculator = Calculator::with_options(options);
        keys(&mut calculator, "123");
        assert!(calculator.undo());
        assert!(calculator.undo());
        assert!(!calculator.undo());
        assert_eq!(calculator.to_evaluable_string(), "1");
    }

    #[test]
    fn clear_keeps_history() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "2*3");
        calculator.calculate();
        calculator.clear();
        assert!(calculator.tree().is_empty());
        assert_eq!(calculator.result(), None);
        assert_eq!(calculator.history().len(), 1);

        assert!(calculator.undo());
        assert_eq!(calculator.to_evaluable_string(), "2*3");
    }

    #[test]
    fn history_limit() {
        let options = CalculatorOptions::default().into_builder().history_limit(2).build();
        let mut calculator = Calculator::with_options(options);
        for key in ['1', '2', '3'] {
            calculator.clear();
            calculator.key(Key::Char(key));
            calculator.calculate();
        }
        let outputs = calculator.history().iter().map(|entry| entry.output.as_str()).collect::<Vec<_>>();
        assert_eq!(outputs, ["2", "3"]);
    }

    #[test]
    fn hover_is_dropped_with_its_node() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "7");
        let seven = calculator.active().unwrap();
        assert!(calculator.set_hover(Some(seven)));
        assert_eq!(calculator.render_markup(), r"\textcolor{orange}{7\textcolor{blue}{|}}");

        calculator.delete();
        assert_eq!(calculator.hover(), None);
    }

    #[test]
    fn render_is_idempotent() {
        let mut calculator = Calculator::new();
        keys(&mut calculator, "1//2");
        let markup = calculator.render_markup();
        assert_eq!(calculator.render_markup(), markup);
        assert_eq!(calculator.to_evaluable_string(), "1(2)/(0)");
    }

    #[test]
    fn scripted_sessions_keep_invariants() {
        let script = [
            Key::Char('('), Key::Char('1'), Key::Char('/'), Key::Char('/'), Key::Char('x'),
            Key::Right, Key::Char('2'), Key::Char('^'), Key::Char('3'), Key::Backspace,
            Key::Backspace, Key::Backspace, Key::Up, Key::Up, Key::Char(')'), Key::Char('+'),
            Key::Tab, Key::Tab, Key::Tab, Key::Backspace, Key::BackTab, Key::Char('9'),
            Key::Down, Key::Left, Key::Delete, Key::Char(','), Key::Char(')'), Key::Enter,
        ];

        let mut calculator = Calculator::new();
        for key in script {
            calculator.key(key);
            let state = calculator.state();
            assert_eq!(state.check_invariants(), Ok(()), "after {:?}", key);

            for node in state.tree().nodes() {
                let count = node.children.len();
                match node.kind {
                    NodeKind::Fraction | NodeKind::Power => assert!(count == 0 || count == 2),
                    NodeKind::Sqrt => assert!(count <= 1),
                    _ => (),
                }
                if !node.id.is_root() {
                    let parents = state.tree().nodes()
                        .filter(|parent| parent.children.contains(&node.id))
                        .count();
                    assert_eq!(parents, 1, "{} after {:?}", node.id, key);
                }
            }
            assert!(state.tree().parent_info(NodeId::ROOT).is_none());
        }
    }
}
