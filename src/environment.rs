use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope.  Closures, bound methods and nested blocks all
/// alias the same scope, so it lives as long as any of them does.
pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap into a fresh shared handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    pub fn enclosing(&self) -> Option<EnvRef> {
        self.enclosing.clone()
    }

    /// Bind `name` in this scope, replacing any binding of the same name here.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }
}

/// The scope `distance` hops out from `env` (0 is `env` itself).
pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
    let mut current: EnvRef = Rc::clone(env);

    for _ in 0..distance {
        let next: EnvRef = current.borrow().enclosing()?;
        current = next;
    }

    Some(current)
}

/// Read `name` directly from the scope `distance` hops out, without
/// searching the chain.
pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
    debug!("get_at '{}' distance {}", name.lexeme, distance);

    ancestor(env, distance)
        .and_then(|scope| scope.borrow().values.get(&name.lexeme).cloned())
        .ok_or_else(|| undefined(name))
}

/// Write `name` directly into the scope `distance` hops out.
pub fn assign_at(
    env: &EnvRef,
    distance: usize,
    name: &Token,
    value: Value,
) -> Result<(), RuntimeError> {
    debug!("assign_at '{}' distance {}", name.lexeme, distance);

    let scope: EnvRef = ancestor(env, distance).ok_or_else(|| undefined(name))?;
    scope.borrow_mut().define(&name.lexeme, value);

    Ok(())
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}

impl fmt::Debug for Environment {
    /// Names only: printing values could recurse forever through closures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_enclosing", &self.enclosing.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, name, 1)
    }

    #[test]
    fn get_walks_the_chain() {
        let globals = Environment::new().into_ref();
        globals.borrow_mut().define("a", Value::Number(1.0));

        let inner = Environment::with_enclosing(Rc::clone(&globals)).into_ref();

        assert_eq!(inner.borrow().get(&ident("a")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn assign_updates_the_defining_scope() {
        let globals = Environment::new().into_ref();
        globals.borrow_mut().define("a", Value::Number(1.0));
        let inner = Environment::with_enclosing(Rc::clone(&globals)).into_ref();

        inner
            .borrow_mut()
            .assign(&ident("a"), Value::Number(2.0))
            .unwrap();

        assert_eq!(globals.borrow().get(&ident("a")), Ok(Value::Number(2.0)));
    }

    #[test]
    fn undefined_names_fail() {
        let env = Environment::new().into_ref();

        let err = env.borrow().get(&ident("nope")).unwrap_err();
        assert_eq!(err.message, "Undefined variable 'nope'.");

        let err = env
            .borrow_mut()
            .assign(&ident("nope"), Value::Nil)
            .unwrap_err();
        assert_eq!(err.message, "Undefined variable 'nope'.");
    }

    #[test]
    fn distance_access_skips_shadowing() {
        let outer = Environment::new().into_ref();
        outer.borrow_mut().define("x", Value::Number(1.0));
        let inner = Environment::with_enclosing(Rc::clone(&outer)).into_ref();
        inner.borrow_mut().define("x", Value::Number(2.0));

        assert_eq!(get_at(&inner, 0, &ident("x")), Ok(Value::Number(2.0)));
        assert_eq!(get_at(&inner, 1, &ident("x")), Ok(Value::Number(1.0)));

        assign_at(&inner, 1, &ident("x"), Value::Number(3.0)).unwrap();
        assert_eq!(outer.borrow().get(&ident("x")), Ok(Value::Number(3.0)));
        assert_eq!(get_at(&inner, 0, &ident("x")), Ok(Value::Number(2.0)));
    }
}
