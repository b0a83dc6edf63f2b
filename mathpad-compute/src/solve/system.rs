use crate::{evaluator::Evaluator, numerical::error::Error, poly::Monomial};
use std::collections::BTreeSet;
use super::{
    equation::{normalise, Solution, DETERMINANT_EPSILON},
    error::{CalcError, CalcErrorKind, UnsupportedEquationForm},
    split_equation,
};

/// Solves a system of two linear equations in two unknowns, such as `x + y = 3` and `x - y = 1`,
/// using Cramer's rule.
pub fn solve_system<E: Evaluator + ?Sized>(equations: &[&str], evaluator: &E) -> Result<Solution, CalcError> {
    let unsupported = |source: &str, reason: &str| CalcError::new(
        CalcErrorKind::Unsolvable,
        source,
        Error::new(vec![0..source.len()], UnsupportedEquationForm { reason: reason.to_string() }),
    );

    let [first, second] = equations else {
        let source = equations.join("\n");
        return Err(unsupported(&source, "a system that does not have exactly two equations"));
    };

    let mut polys = Vec::with_capacity(2);
    for equation in [first, second] {
        let difference = split_equation(equation)
            .map(|(left, right)| format!("({})-({})", left, right))
            .unwrap_or_else(|| equation.to_string());
        let poly = normalise(&difference, evaluator)?;
        if poly.degree() > 1 {
            return Err(unsupported(&difference, "a system with a non-linear equation"));
        }
        polys.push(poly);
    }

    let variables = polys.iter()
        .flat_map(|poly| poly.variables())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let &[x, y] = variables.as_slice() else {
        let source = equations.join("\n");
        return Err(unsupported(&source, "a system that does not have exactly two unknowns"));
    };

    // each equation reads `a x + b y + c = 0`
    let coeffs = |index: usize| {
        let poly = &polys[index];
        (
            poly.coeff(&Monomial::var(x, 1)),
            poly.coeff(&Monomial::var(y, 1)),
            -poly.coeff(&Monomial::one()),
        )
    };
    let (a1, b1, e1) = coeffs(0);
    let (a2, b2, e2) = coeffs(1);

    let determinant = a1 * b2 - a2 * b1;
    if determinant.abs() <= DETERMINANT_EPSILON * (a1 * b2).abs().max((a2 * b1).abs()) {
        return Ok(Solution::NoUniqueSolution);
    }

    Ok(Solution::System(vec![
        (x.to_string(), (e1 * b2 - e2 * b1) / determinant),
        (y.to_string(), (a1 * e2 - a2 * e1) / determinant),
    ]))
}
