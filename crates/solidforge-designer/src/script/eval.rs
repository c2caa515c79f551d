//! Tree-walking evaluator for modeling scripts.

use super::parser::{Arg, BinaryOp, Expr, Stmt};
use super::{ScriptFailure, Span, RESULT_BINDING};
use solidforge_core::{BooleanOp, GeometryHandle, ModelingError, Result, ShapeBuilder};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Shape(GeometryHandle),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Shape(_) => "shape",
        }
    }
}

type Eval<T> = std::result::Result<T, ScriptFailure>;

/// Evaluated call arguments, bound against a parameter list.
struct CallArgs {
    function: String,
    span: Span,
    positional: Vec<(Value, Span)>,
    keywords: Vec<(String, Value, Span)>,
}

impl CallArgs {
    /// Bind to `params` in order; missing trailing params come back as `None`.
    fn bind(self, params: &[&str], required: usize) -> Eval<Vec<Option<(Value, Span)>>> {
        if self.positional.len() > params.len() {
            return Err(ScriptFailure::new(
                self.span,
                format!(
                    "{}() takes at most {} arguments, got {}",
                    self.function,
                    params.len(),
                    self.positional.len()
                ),
            ));
        }

        let mut slots: Vec<Option<(Value, Span)>> = vec![None; params.len()];
        for (slot, arg) in slots.iter_mut().zip(self.positional) {
            *slot = Some(arg);
        }

        for (name, value, span) in self.keywords {
            let Some(index) = params.iter().position(|p| *p == name) else {
                return Err(ScriptFailure::new(
                    span,
                    format!("{}() has no parameter '{}'", self.function, name),
                ));
            };
            if slots[index].is_some() {
                return Err(ScriptFailure::new(
                    span,
                    format!("{}() got '{}' more than once", self.function, name),
                ));
            }
            slots[index] = Some((value, span));
        }

        if let Some(missing) = slots[..required].iter().position(Option::is_none) {
            return Err(ScriptFailure::new(
                self.span,
                format!("{}() missing argument '{}'", self.function, params[missing]),
            ));
        }

        Ok(slots)
    }

    /// All-positional shape list of at least two operands.
    fn shapes(self) -> Eval<Vec<GeometryHandle>> {
        if let Some((name, _, span)) = self.keywords.first() {
            return Err(ScriptFailure::new(
                *span,
                format!("{}() does not take keyword '{}'", self.function, name),
            ));
        }
        if self.positional.len() < 2 {
            return Err(ScriptFailure::new(
                self.span,
                format!("{}() needs at least two shapes", self.function),
            ));
        }
        self.positional
            .into_iter()
            .map(|(value, span)| expect_shape(value, span))
            .collect()
    }
}

fn expect_number(value: Value, span: Span) -> Eval<f64> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(ScriptFailure::new(
            span,
            format!("expected a number, got {}", other.type_name()),
        )),
    }
}

fn expect_bool(value: Value, span: Span) -> Eval<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(ScriptFailure::new(
            span,
            format!("expected true or false, got {}", other.type_name()),
        )),
    }
}

fn expect_shape(value: Value, span: Span) -> Eval<GeometryHandle> {
    match value {
        Value::Shape(handle) => Ok(handle),
        other => Err(ScriptFailure::new(
            span,
            format!("expected a shape, got {}", other.type_name()),
        )),
    }
}

fn number_or(slot: Option<(Value, Span)>, default: f64) -> Eval<f64> {
    slot.map_or(Ok(default), |(value, span)| expect_number(value, span))
}

fn bool_or(slot: Option<(Value, Span)>, default: bool) -> Eval<bool> {
    slot.map_or(Ok(default), |(value, span)| expect_bool(value, span))
}

pub struct Interpreter<'a, B: ?Sized> {
    builder: &'a B,
    scope: HashMap<String, Value>,
}

impl<'a, B> Interpreter<'a, B>
where
    B: ShapeBuilder + ?Sized,
{
    pub fn new(builder: &'a B) -> Self {
        Self {
            builder,
            scope: HashMap::new(),
        }
    }

    pub fn run(mut self, program: &[Stmt]) -> Result<GeometryHandle> {
        for stmt in program {
            match stmt {
                Stmt::Assign { name, value } => {
                    let value = self.eval(value)?;
                    debug!("script binds '{}' to {}", name, value.type_name());
                    self.scope.insert(name.clone(), value);
                }
                Stmt::Expr(expr) => {
                    self.eval(expr)?;
                }
            }
        }

        match self.scope.remove(RESULT_BINDING) {
            Some(Value::Shape(handle)) => Ok(handle),
            Some(other) => Err(ModelingError::script(format!(
                "'{}' must be a shape, got {}",
                RESULT_BINDING,
                other.type_name()
            ))),
            None => Err(ModelingError::MissingResult),
        }
    }

    fn eval(&self, expr: &Expr) -> Eval<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Variable { name, span } => self.lookup(name, *span),
            Expr::Negate { operand, span } => {
                let value = expect_number(self.eval(operand)?, *span)?;
                Ok(Value::Number(-value))
            }
            Expr::Binary { op, lhs, rhs, span } => {
                let a = expect_number(self.eval(lhs)?, *span)?;
                let b = expect_number(self.eval(rhs)?, *span)?;
                let value = match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => {
                        if b == 0.0 {
                            return Err(ScriptFailure::new(*span, "division by zero"));
                        }
                        a / b
                    }
                };
                Ok(Value::Number(value))
            }
            Expr::Call {
                function,
                args,
                span,
            } => {
                let args = self.eval_args(function, args, *span)?;
                self.call(args)
            }
        }
    }

    fn lookup(&self, name: &str, span: Span) -> Eval<Value> {
        if let Some(value) = self.scope.get(name) {
            return Ok(value.clone());
        }
        match name {
            "pi" => Ok(Value::Number(std::f64::consts::PI)),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(ScriptFailure::new(span, format!("unknown name '{}'", name))),
        }
    }

    fn eval_args(&self, function: &str, args: &[Arg], span: Span) -> Eval<CallArgs> {
        let mut positional = Vec::new();
        let mut keywords = Vec::new();

        for arg in args {
            let value = self.eval(&arg.value)?;
            match &arg.name {
                Some(name) => keywords.push((name.clone(), value, arg.span)),
                None if !keywords.is_empty() => {
                    return Err(ScriptFailure::new(
                        arg.span,
                        "positional argument after keyword argument",
                    ))
                }
                None => positional.push((value, arg.span)),
            }
        }

        Ok(CallArgs {
            function: function.to_string(),
            span,
            positional,
            keywords,
        })
    }

    fn call(&self, args: CallArgs) -> Eval<Value> {
        let span = args.span;
        let engine = |result: Result<GeometryHandle>| {
            result
                .map(Value::Shape)
                .map_err(|e| ScriptFailure::new(span, e.to_string()))
        };

        match args.function.as_str() {
            "box" => {
                let mut slots = args
                    .bind(&["width", "length", "height", "centered"], 3)?
                    .into_iter();
                let width = number_or(slots.next().flatten(), 0.0)?;
                let length = number_or(slots.next().flatten(), 0.0)?;
                let height = number_or(slots.next().flatten(), 0.0)?;
                let centered = bool_or(slots.next().flatten(), true)?;
                engine(self.builder.make_box(width, length, height, centered))
            }
            "cylinder" => {
                let mut slots = args.bind(&["radius", "height", "centered"], 2)?.into_iter();
                let radius = number_or(slots.next().flatten(), 0.0)?;
                let height = number_or(slots.next().flatten(), 0.0)?;
                let centered = bool_or(slots.next().flatten(), true)?;
                engine(self.builder.make_cylinder(radius, height, centered))
            }
            "translate" => {
                let mut slots = args.bind(&["shape", "x", "y", "z"], 1)?.into_iter();
                let shape = match slots.next().flatten() {
                    Some((value, span)) => expect_shape(value, span)?,
                    None => return Err(ScriptFailure::new(span, "translate() needs a shape")),
                };
                let x = number_or(slots.next().flatten(), 0.0)?;
                let y = number_or(slots.next().flatten(), 0.0)?;
                let z = number_or(slots.next().flatten(), 0.0)?;
                engine(self.builder.translate(&shape, x, y, z))
            }
            "union" => self.fold(BooleanOp::Union, args),
            "difference" | "subtract" | "cut" => self.fold(BooleanOp::Subtract, args),
            "intersection" | "intersect" => self.fold(BooleanOp::Intersect, args),
            other => Err(ScriptFailure::new(
                span,
                format!("unknown function '{}'", other),
            )),
        }
    }

    /// Left fold of a boolean over two or more shapes.
    fn fold(&self, op: BooleanOp, args: CallArgs) -> Eval<Value> {
        let span = args.span;
        let mut shapes = args.shapes()?.into_iter();
        let Some(mut acc) = shapes.next() else {
            return Err(ScriptFailure::new(span, "no shapes to combine"));
        };
        for shape in shapes {
            acc = self
                .builder
                .combine(op, &acc, &shape)
                .map_err(|e| ScriptFailure::new(span, e.to_string()))?;
        }
        Ok(Value::Shape(acc))
    }
}
