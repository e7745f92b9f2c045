//! Exact symbolic scalars.
//!
//! An [`Expr`] is a polynomial in real free symbols whose coefficients are
//! Gaussian rationals. Expressions are kept in canonical form at all times:
//! terms are ordered by monomial and no stored coefficient is zero, so
//! structural equality coincides with algebraic equality and comparing
//! against zero is exact.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ErrorInfo, HsymError};

/// Gaussian rational `re + im*i` attached to every term of an [`Expr`].
pub type Coeff = Complex<BigRational>;

fn real_coeff(value: BigRational) -> Coeff {
    Complex::new(value, BigRational::zero())
}

/// Product of named real symbols raised to positive powers.
///
/// The empty monomial stands for the constant `1` and sorts before every
/// other monomial.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<String, u32>);

impl Monomial {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    /// A single symbol to the first power.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self(BTreeMap::from([(name.into(), 1)]))
    }

    /// Returns `true` for the constant monomial.
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Total degree of the monomial.
    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterates over `(symbol, exponent)` pairs in symbol order.
    pub fn powers(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(name, exp)| (name.as_str(), *exp))
    }

    fn times(&self, other: &Monomial) -> Monomial {
        let mut powers = self.0.clone();
        for (name, exp) in &other.0 {
            *powers.entry(name.clone()).or_insert(0) += exp;
        }
        Monomial(powers)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (idx, (name, exp)) in self.powers().enumerate() {
            if idx > 0 {
                write!(f, "*")?;
            }
            if exp == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{name}^{exp}")?;
            }
        }
        Ok(())
    }
}

/// Exact symbolic scalar in canonical polynomial form.
///
/// Every free symbol denotes a real number, so [`Expr::conj`] leaves symbols
/// untouched: `conj(a) = a`. A complex-valued unknown has to be written with
/// two real symbols, e.g. `a + i*b`, whose conjugate is then `a - i*b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Expr {
    terms: BTreeMap<Monomial, Coeff>,
}

fn insert_term(terms: &mut BTreeMap<Monomial, Coeff>, monomial: Monomial, coeff: Coeff) {
    if coeff.is_zero() {
        return;
    }
    match terms.entry(monomial) {
        Entry::Vacant(slot) => {
            slot.insert(coeff);
        }
        Entry::Occupied(mut slot) => {
            let sum = slot.get() + &coeff;
            if sum.is_zero() {
                slot.remove();
            } else {
                *slot.get_mut() = sum;
            }
        }
    }
}

impl Expr {
    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Self::int(1)
    }

    /// An integer constant.
    pub fn int(value: i64) -> Self {
        Self::from_coeff(real_coeff(BigRational::from_integer(BigInt::from(value))))
    }

    /// The rational constant `num / den`; fails when `den` is zero.
    pub fn rational(num: i64, den: i64) -> Result<Self, HsymError> {
        if den == 0 {
            return Err(HsymError::Expr(
                ErrorInfo::new("zero-denominator", "rational constant with zero denominator")
                    .with_context("numerator", num),
            ));
        }
        let value = BigRational::new(BigInt::from(num), BigInt::from(den));
        Ok(Self::from_coeff(real_coeff(value)))
    }

    /// The Gaussian integer `re + im*i`.
    pub fn complex(re: i64, im: i64) -> Self {
        Self::from_coeff(Complex::new(
            BigRational::from_integer(BigInt::from(re)),
            BigRational::from_integer(BigInt::from(im)),
        ))
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Self::complex(0, 1)
    }

    /// A free symbol. Symbols are always real; see [`Expr`].
    pub fn symbol(name: impl Into<String>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::symbol(name), Coeff::one());
        Self { terms }
    }

    /// A constant with the given coefficient.
    pub fn from_coeff(coeff: Coeff) -> Self {
        let mut terms = BTreeMap::new();
        insert_term(&mut terms, Monomial::one(), coeff);
        Self { terms }
    }

    /// Returns `true` if the expression is identically zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if the expression contains no free symbols.
    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(Monomial::is_one)
    }

    /// Returns the value of a constant expression.
    pub fn as_constant(&self) -> Option<Coeff> {
        match self.terms.len() {
            0 => Some(Coeff::zero()),
            1 => self.terms.get(&Monomial::one()).cloned(),
            _ => None,
        }
    }

    /// Returns `true` if every coefficient is real.
    pub fn is_real(&self) -> bool {
        self.terms.values().all(|coeff| coeff.im.is_zero())
    }

    /// Iterates over the terms in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Coeff)> + '_ {
        self.terms.iter()
    }

    /// Names of the free symbols appearing in the expression.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|monomial| monomial.powers().map(|(name, _)| name.to_string()))
            .collect()
    }

    /// Complex conjugate of the coefficients.
    ///
    /// Free symbols are real and stay unchanged, so conjugating a matrix of
    /// bare symbols returns it as is.
    pub fn conj(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(monomial, coeff)| (monomial.clone(), coeff.conj()))
            .collect();
        Self { terms }
    }

    /// Real part.
    pub fn re(&self) -> Self {
        self.project(|coeff| real_coeff(coeff.re.clone()))
    }

    /// Imaginary part, as a real expression.
    pub fn im(&self) -> Self {
        self.project(|coeff| real_coeff(coeff.im.clone()))
    }

    fn project(&self, part: impl Fn(&Coeff) -> Coeff) -> Self {
        let mut terms = BTreeMap::new();
        for (monomial, coeff) in &self.terms {
            insert_term(&mut terms, monomial.clone(), part(coeff));
        }
        Self { terms }
    }

    /// Raises the expression to a non-negative integer power.
    pub fn pow(&self, exp: u32) -> Self {
        (0..exp).fold(Self::one(), |acc, _| acc.times(self))
    }

    /// Divides by `rhs`, which must be a non-zero constant.
    pub fn checked_div(&self, rhs: &Expr) -> Result<Self, HsymError> {
        if rhs.is_zero() {
            return Err(HsymError::Expr(
                ErrorInfo::new("division-by-zero", "divisor is identically zero")
                    .with_context("numerator", self),
            ));
        }
        let divisor = rhs.as_constant().ok_or_else(|| {
            HsymError::Expr(
                ErrorInfo::new("non-constant-divisor", "division requires a constant divisor")
                    .with_context("divisor", rhs)
                    .with_hint("free symbols cannot appear in a divisor"),
            )
        })?;
        let terms = self
            .terms
            .iter()
            .map(|(monomial, coeff)| (monomial.clone(), coeff / &divisor))
            .collect();
        Ok(Self { terms })
    }

    fn plus(&self, rhs: &Expr) -> Self {
        let mut terms = self.terms.clone();
        for (monomial, coeff) in &rhs.terms {
            insert_term(&mut terms, monomial.clone(), coeff.clone());
        }
        Self { terms }
    }

    fn minus(&self, rhs: &Expr) -> Self {
        let mut terms = self.terms.clone();
        for (monomial, coeff) in &rhs.terms {
            insert_term(&mut terms, monomial.clone(), -coeff.clone());
        }
        Self { terms }
    }

    fn times(&self, rhs: &Expr) -> Self {
        let mut terms = BTreeMap::new();
        for (lhs_mono, lhs_coeff) in &self.terms {
            for (rhs_mono, rhs_coeff) in &rhs.terms {
                insert_term(&mut terms, lhs_mono.times(rhs_mono), lhs_coeff * rhs_coeff);
            }
        }
        Self { terms }
    }

    fn negated(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(monomial, coeff)| (monomial.clone(), -coeff.clone()))
            .collect();
        Self { terms }
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                self.$inner(rhs)
            }
        }

        impl $imp<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                self.$inner(&rhs)
            }
        }

        impl $imp<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                (&self).$inner(rhs)
            }
        }

        impl $imp<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                (&self).$inner(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, plus);
forward_binop!(Sub, sub, minus);
forward_binop!(Mul, mul, times);

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.negated()
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.negated()
    }
}

impl Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        iter.fold(Expr::zero(), |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a Expr> for Expr {
    fn sum<I: Iterator<Item = &'a Expr>>(iter: I) -> Expr {
        iter.fold(Expr::zero(), |acc, value| acc + value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

fn imag_factor(magnitude: &BigRational) -> String {
    if magnitude.is_one() {
        "i".to_string()
    } else {
        format!("{magnitude}*i")
    }
}

/// Renders one term without its leading sign; returns `(negative, body)`.
fn render_term(monomial: &Monomial, coeff: &Coeff) -> (bool, String) {
    let (negative, factor) = if coeff.im.is_zero() {
        let magnitude = coeff.re.abs();
        let factor = if magnitude.is_one() && !monomial.is_one() {
            None
        } else {
            Some(magnitude.to_string())
        };
        (coeff.re.is_negative(), factor)
    } else if coeff.re.is_zero() {
        (coeff.im.is_negative(), Some(imag_factor(&coeff.im.abs())))
    } else {
        let sign = if coeff.im.is_negative() { '-' } else { '+' };
        let factor = format!("({} {sign} {})", coeff.re, imag_factor(&coeff.im.abs()));
        (false, Some(factor))
    };
    let body = match (factor, monomial.is_one()) {
        (Some(factor), true) => factor,
        (Some(factor), false) => format!("{factor}*{monomial}"),
        (None, _) => monomial.to_string(),
    };
    (negative, body)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (idx, (monomial, coeff)) in self.terms.iter().enumerate() {
            let (negative, body) = render_term(monomial, coeff);
            match (idx, negative) {
                (0, true) => write!(f, "-{body}")?,
                (0, false) => write!(f, "{body}")?,
                (_, true) => write!(f, " - {body}")?,
                (_, false) => write!(f, " + {body}")?,
            }
        }
        Ok(())
    }
}

/// Serialized form of a single term; rationals are written as `p/q` strings.
#[derive(Serialize, Deserialize)]
struct TermRepr {
    re: String,
    im: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    powers: BTreeMap<String, u32>,
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.terms.iter().map(|(monomial, coeff)| TermRepr {
            re: coeff.re.to_string(),
            im: coeff.im.to_string(),
            powers: monomial.0.clone(),
        }))
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let reprs = Vec::<TermRepr>::deserialize(deserializer)?;
        let mut terms = BTreeMap::new();
        for repr in reprs {
            let re: BigRational = repr.re.parse().map_err(D::Error::custom)?;
            let im: BigRational = repr.im.parse().map_err(D::Error::custom)?;
            let powers = repr.powers.into_iter().filter(|(_, exp)| *exp > 0).collect();
            insert_term(&mut terms, Monomial(powers), Complex::new(re, im));
        }
        Ok(Self { terms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_term_cancels_to_nothing() {
        let mut terms = BTreeMap::new();
        insert_term(&mut terms, Monomial::symbol("a"), Coeff::one());
        insert_term(&mut terms, Monomial::symbol("a"), -Coeff::one());
        assert!(terms.is_empty());
    }

    #[test]
    fn monomial_product_adds_exponents() {
        let a = Monomial::symbol("a");
        let aab = a.times(&a).times(&Monomial::symbol("b"));
        assert_eq!(aab.degree(), 3);
        assert_eq!(aab.to_string(), "a^2*b");
    }
}
