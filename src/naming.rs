//! Naming conventions turn a result-set column name into the field name it
//! should bind to.
//!
//! Every convention receives the `next` convention of its chain. The built-in
//! [`DefaultConvention`] and [`IdentityConvention`] ignore it; it exists so a
//! custom convention can handle the names it knows about and hand the rest
//! down. The resolver always passes [`IdentityConvention`] as the terminal
//! `next`.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;
use crate::record::FieldHasher;

pub trait NamingConvention: Send + Sync {
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String;

    /// Run `self` with `next` installed as its successor. `next` in turn
    /// receives whatever successor the chain itself is called with.
    fn then<N>(self, next: N) -> Chain<Self, N>
    where
        Self: Sized,
        N: NamingConvention,
    {
        Chain { first: self, second: next }
    }
}

lazy_static! {
    static ref DEFAULT_CONVENTION: Arc<dyn NamingConvention> = Arc::new(DefaultConvention);
}

/// The shared default, built on first use and never changed afterwards.
pub fn default_convention() -> Arc<dyn NamingConvention> {
    Arc::clone(&DEFAULT_CONVENTION)
}

/// `first_name` becomes `FirstName`, `user_id` becomes `UserID`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConvention;

impl NamingConvention for DefaultConvention {
    fn convert(&self, name: &str, _next: &dyn NamingConvention) -> String {
        let name = camel_case(name);
        match name.strip_suffix("Id") {
            Some(stem) => format!("{stem}ID"),
            None => name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConvention;

impl NamingConvention for IdentityConvention {
    fn convert(&self, name: &str, _next: &dyn NamingConvention) -> String {
        name.to_string()
    }
}

/// Drops underscores and upper-cases the character following each one, as
/// well as the very first character. Everything else keeps its case.
pub fn camel_case(name: &str) -> String {
    let mut converted = String::with_capacity(name.len());
    let mut boundary = true;
    for c in name.chars() {
        if c == '_' {
            boundary = true;
            continue;
        }
        if boundary {
            converted.extend(c.to_uppercase());
            boundary = false;
        } else {
            converted.push(c);
        }
    }
    converted
}

/// A convention backed by a closure, for one-off mappings.
pub struct FnConvention<F>(pub F);

impl<F> NamingConvention for FnConvention<F>
where
    F: Fn(&str, &dyn NamingConvention) -> String + Send + Sync,
{
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String {
        (self.0)(name, next)
    }
}

pub struct Chain<A, B> {
    first: A,
    second: B,
}

// `second` bound to the successor the chain was called with
struct Link<'a> {
    head: &'a dyn NamingConvention,
    rest: &'a dyn NamingConvention,
}

impl NamingConvention for Link<'_> {
    fn convert(&self, name: &str, _next: &dyn NamingConvention) -> String {
        self.head.convert(name, self.rest)
    }
}

impl<A, B> NamingConvention for Chain<A, B>
where
    A: NamingConvention,
    B: NamingConvention,
{
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String {
        let link = Link { head: &self.second, rest: next };
        self.first.convert(name, &link)
    }
}

/// Explicit column to field overrides. Columns without an override are
/// passed on to `next`.
#[derive(Debug, Clone, Default)]
pub struct RenameConvention {
    renames: HashMap<String, String, FieldHasher>,
}

impl RenameConvention {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn rename(mut self, column: impl Into<String>, field: impl Into<String>) -> Self {
        self.renames.insert(column.into(), field.into());
        self
    }
    pub fn len(&self) -> usize {
        self.renames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RenameConvention
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            renames: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl NamingConvention for RenameConvention {
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String {
        match self.renames.get(name) {
            Some(field) => field.clone(),
            None => next.convert(name, &IdentityConvention),
        }
    }
}

/// Applies regex rewrites to the raw column name, in order, and passes the
/// result on to `next`.
#[derive(Debug, Clone, Default)]
pub struct RewriteConvention {
    rules: Vec<(Regex, String)>,
}

impl RewriteConvention {
    pub fn new() -> Self {
        Self::default()
    }
    /// Fails when `pattern` is not a valid regular expression.
    pub fn rule(mut self, pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        self.rules.push((Regex::new(pattern)?, replacement.into()));
        Ok(self)
    }
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl NamingConvention for RewriteConvention {
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String {
        let mut rewritten = name.to_string();
        for (pattern, replacement) in &self.rules {
            rewritten = pattern.replace_all(&rewritten, replacement.as_str()).into_owned();
        }
        next.convert(&rewritten, &IdentityConvention)
    }
}

impl NamingConvention for Arc<dyn NamingConvention> {
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String {
        (**self).convert(name, next)
    }
}

impl NamingConvention for Box<dyn NamingConvention> {
    fn convert(&self, name: &str, next: &dyn NamingConvention) -> String {
        (**self).convert(name, next)
    }
}
