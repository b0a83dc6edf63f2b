use crate::{consts, funcs};
use levenshtein::levenshtein;
use std::collections::HashMap;
use super::{builtin::Builtin, trig_mode::TrigMode};

/// A context to use when evaluating an expression, containing the constants and functions that
/// can be used within the expression.
#[derive(Debug, Clone)]
pub struct Ctxt {
    /// The variables in the context. These are the names that have a value; every other name is
    /// a free variable that can only appear in an equation.
    vars: HashMap<String, f64>,

    /// The functions in the context.
    funcs: HashMap<String, &'static dyn Builtin>,

    /// The trigonometric mode of the context.
    pub trig_mode: TrigMode,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: consts::all()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            funcs: funcs::all()
                .iter()
                .map(|(name, func)| (name.to_string(), *func))
                .collect(),
            trig_mode: TrigMode::default(),
        }
    }
}

impl Ctxt {
    /// Creates a new empty context.
    ///
    /// The empty context is probably not very useful, as it does not contain any constants or
    /// functions. Consider using the [`Default`] implementation instead.
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            funcs: HashMap::new(),
            trig_mode: TrigMode::default(),
        }
    }

    /// Returns the context with the given trigonometric mode.
    pub fn with_trig_mode(mut self, trig_mode: TrigMode) -> Self {
        self.trig_mode = trig_mode;
        self
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Add a builtin function to the context, replacing any function with the same name.
    pub fn add_func(&mut self, func: &'static dyn Builtin) {
        self.funcs.insert(func.name().to_string(), func);
    }

    /// Get a function in the context.
    pub fn get_func(&self, name: &str) -> Option<&'static dyn Builtin> {
        self.funcs.get(name).copied()
    }

    /// Returns the functions in the context.
    pub fn get_funcs(&self) -> &HashMap<String, &'static dyn Builtin> {
        &self.funcs
    }

    /// Returns all functions in the context with a name similar to the given name, sorted by
    /// name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<&str> {
        let mut similar = self.funcs
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(|n| n.as_str())
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }

    /// Returns true if the name is neither a variable nor a function of this context, meaning it
    /// can only stand for an unknown.
    pub fn is_free_symbol(&self, name: &str) -> bool {
        !self.vars.contains_key(name) && !self.funcs.contains_key(name)
    }
}
