use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::Callable;
use crate::error::RuntimeError;
use crate::function::LoxFunction;
use crate::interpreter::{IResult, Interpreter};
use crate::token::Token;
use crate::value::Value;

/// Name of the method that acts as the constructor.
pub const INITIALIZER: &str = "init";

pub struct LoxClass {
    name: String,
    superclass: Option<Rc<LoxClass>>,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl LoxClass {
    pub fn new(
        name: impl Into<String>,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        Self {
            name: name.into(),
            superclass,
            methods,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Own methods first, then up the superclass chain.
    fn lookup(&self, name: &str) -> Option<&Rc<LoxFunction>> {
        match self.methods.get(name) {
            Some(method) => Some(method),
            None => self.superclass.as_deref().and_then(|sup| sup.lookup(name)),
        }
    }

    /// The method `name` bound to `instance`, or `None` if no class in the
    /// chain defines it.
    pub fn find_method(
        &self,
        instance: &Rc<RefCell<LoxInstance>>,
        name: &str,
    ) -> Option<LoxFunction> {
        self.lookup(name).map(|method| method.bind(instance))
    }
}

impl Callable for Rc<LoxClass> {
    fn arity(&self) -> usize {
        self.lookup(INITIALIZER).map_or(0, |init| init.arity())
    }

    /// Instantiation: a fresh instance, run through `init` when there is one.
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> IResult<Value> {
        debug!("Instantiating class '{}'", self.name);

        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(self))));

        if let Some(initializer) = self.find_method(&instance, INITIALIZER) {
            initializer.call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();

        f.debug_struct("LoxClass")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .field("methods", &methods)
            .finish()
    }
}

/// An object: a class pointer plus an open set of fields.
pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    pub fn class(&self) -> &Rc<LoxClass> {
        &self.class
    }

    /// Property read: fields shadow methods; methods come back bound.
    pub fn get(instance: &Rc<RefCell<LoxInstance>>, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = instance.borrow().fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        let class: Rc<LoxClass> = Rc::clone(&instance.borrow().class);

        class
            .find_method(instance, &name.lexeme)
            .map(|method| Value::Function(Rc::new(method)))
            .ok_or_else(|| {
                RuntimeError::new(name, format!("Undefined property '{}'.", name.lexeme))
            })
    }

    /// Property write: always creates or overwrites the field.
    pub fn set(&mut self, name: &Token, value: Value) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.fields.keys().collect();
        fields.sort();

        f.debug_struct("LoxInstance")
            .field("class", &self.class.name())
            .field("fields", &fields)
            .finish()
    }
}
