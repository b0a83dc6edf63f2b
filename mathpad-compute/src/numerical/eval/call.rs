use mathpad_parser::parser::call::Call;
use crate::numerical::{
    ctxt::Ctxt,
    error::{kind::UndefinedFunction, Error},
    eval::Eval,
};

impl Eval for Call {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        let func = ctxt.get_func(&self.name.name)
            .ok_or_else(|| Error::new(vec![self.name.span.clone()], UndefinedFunction {
                name: self.name.name.clone(),
                suggestions: ctxt.get_similar_funcs(&self.name.name)
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect(),
            }))?;

        let args = self.args
            .iter()
            .map(|arg| arg.eval(ctxt))
            .collect::<Result<Vec<_>, _>>()?;

        func.eval(ctxt.trig_mode, args)
            .map_err(|err| err.into_error(self))
    }
}
