//! The tree-walking evaluator.
//!
//! [`Interpreter::eval`] turns an expression node into a value (or absence);
//! [`Interpreter::exec`] runs a statement for effect and reports whether it
//! hit a `return`. Both recurse on the native stack. Locals live on the
//! interpreter's [`CallStack`], addressed by the slots the resolver bound.
//!
//! A *block* is wherever a body is expected: a form whose first child is a
//! form is a statement sequence, `()` is empty, and any other form is a
//! single statement.

use crate::builtins::{Arity, arith, collection, compare, convert};
use crate::error::{RuntimeError, RuntimeResult};
use crate::resolve::Program;
use crate::stack::CallStack;
use crate::value::{Repr, Table, Value, truthy};
use std::io::Write;
use tessel_syntax::{Binding, Branch, Keyword, Leaf, LeafKind, Node, Span, Spanned};

/// Evaluation limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Deepest allowed user-function nesting; `None` is unbounded
    pub max_call_depth: Option<usize>,
}

/// Outcome of running a statement.
#[derive(Debug, Clone)]
pub enum Flow {
    /// Fell off the end
    Normal,

    /// Hit `return`, with its value
    Return(Option<Value>),
}

/// Executes a resolved [`Program`], writing `print` output to `W`.
pub struct Interpreter<'p, 'src, W: Write> {
    program: &'p Program<'src>,
    stack: CallStack,
    out: W,
    config: Config,
}

impl<'p, 'src, W: Write> Interpreter<'p, 'src, W> {
    /// Creates an interpreter with an empty stack.
    pub fn new(program: &'p Program<'src>, out: W, config: Config) -> Self {
        Self {
            program,
            stack: CallStack::new(),
            out,
            config,
        }
    }

    /// Calls `main` with no arguments.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`RuntimeError`].
    pub fn run(&mut self) -> RuntimeResult<Option<Value>> {
        let span = self.program.function(0).map(|f| f.span).unwrap_or_default();
        tessel_log::debug!("running main");
        let result = self.call(0, &[], span);
        tessel_log::debug!("main finished, {} slots live", self.stack.len());
        result
    }

    /// The value stack.
    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// Consumes the interpreter, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Calls function `index` with the given argument expressions.
    fn call(&mut self, index: usize, args: &[Node<'src>], span: Span) -> RuntimeResult<Option<Value>> {
        let program = self.program;
        let Some(function) = program.function(index) else {
            return Err(RuntimeError::Unresolved {
                name: format!("#{index}"),
                span,
            });
        };

        if let Some(limit) = self.config.max_call_depth {
            if self.stack.depth() >= limit {
                return Err(RuntimeError::CallDepthExceeded { limit, span });
            }
        }
        if args.len() != function.arity {
            return Err(RuntimeError::ArgumentCount {
                name: function.name.to_string(),
                expected: function.arity,
                found: args.len(),
                span,
            });
        }

        let mark = self.stack.len();
        for arg in args {
            match self.eval(arg) {
                Ok(value) => self.stack.push(value),
                Err(err) => {
                    self.stack.truncate(mark);
                    return Err(err);
                }
            }
        }

        tessel_log::trace!("call '{}' with {} argument(s)", function.name, args.len());
        let frame = self.stack.enter(args.len(), function.locals);
        let flow = self.exec_sequence(program.body(index));
        self.stack.leave(frame);

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(None),
        }
    }

    fn exec_sequence(&mut self, nodes: &[Node<'src>]) -> RuntimeResult<Flow> {
        for node in nodes {
            if let Flow::Return(value) = self.exec_block(node)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs a block: a statement sequence, an empty form, or one statement.
    ///
    /// # Errors
    ///
    /// Returns an error for a bare leaf or any failing statement.
    pub fn exec_block(&mut self, node: &Node<'src>) -> RuntimeResult<Flow> {
        match node {
            Node::Leaf(leaf) => Err(statement_leaf(leaf)),
            Node::Branch(branch) => match branch.head() {
                None => Ok(Flow::Normal),
                Some(Node::Branch(_)) => self.exec_sequence(&branch.children),
                Some(Node::Leaf(_)) => self.exec(branch),
            },
        }
    }

    /// Runs one statement form.
    ///
    /// # Errors
    ///
    /// Returns an error for forms that are not statements, malformed control
    /// flow, or anything the form's expressions raise.
    pub fn exec(&mut self, form: &Branch<'src>) -> RuntimeResult<Flow> {
        let head = match form.head() {
            None => return Ok(Flow::Normal),
            Some(Node::Leaf(leaf)) => leaf,
            Some(other) => return Err(RuntimeError::NotCallable { span: other.span() }),
        };

        let keyword = match head.kind {
            LeafKind::Keyword(keyword) => keyword,
            LeafKind::Identifier => {
                let index = function_index(head)?;
                self.call(index, form.operands(), form.span)?;
                return Ok(Flow::Normal);
            }
            _ => return Err(RuntimeError::NotCallable { span: head.span() }),
        };

        check_arity(keyword, form)?;
        let args = form.operands();
        match keyword {
            Keyword::Set => {
                self.assign(&args[0], &args[1])?;
            }
            Keyword::Print => {
                let value = self.eval(&args[0])?;
                self.print(value.as_ref(), form.span)?;
            }
            Keyword::SetItem => {
                let coll = self.eval(&args[0])?;
                let key = self.eval(&args[1])?;
                let value = self.eval(&args[2])?;
                collection::set_item(coll.as_ref(), key.as_ref(), value);
            }
            Keyword::Push => {
                let list = self.eval(&args[0])?;
                let value = self.eval(&args[1])?;
                collection::push(list.as_ref(), value);
            }
            Keyword::Remove => {
                let coll = self.eval(&args[0])?;
                let key = self.eval(&args[1])?;
                collection::remove(coll.as_ref(), key.as_ref());
            }
            Keyword::If => return self.exec_if(form),
            Keyword::While => return self.exec_while(form),
            Keyword::For => return self.exec_for(form),
            Keyword::Return => {
                let value = match args.first() {
                    Some(expr) => self.eval(expr)?,
                    None => None,
                };
                return Ok(Flow::Return(value));
            }
            _ => {
                return Err(RuntimeError::NotAStatement {
                    keyword,
                    span: form.span,
                });
            }
        }
        Ok(Flow::Normal)
    }

    /// `(if C THEN)`, `(if C THEN ELSE)` or `(if C THEN else ELSE)`.
    fn exec_if(&mut self, form: &Branch<'src>) -> RuntimeResult<Flow> {
        let malformed = || RuntimeError::Malformed {
            keyword: Keyword::If,
            span: form.span,
        };
        let is_else = |node: &Node<'_>| {
            node.as_leaf().and_then(Leaf::keyword) == Some(Keyword::Else)
        };

        let (cond, then, otherwise) = match form.operands() {
            [cond, then] => (cond, then, None),
            [cond, then, otherwise] if !is_else(otherwise) => (cond, then, Some(otherwise)),
            [cond, then, marker, otherwise] if is_else(marker) => (cond, then, Some(otherwise)),
            _ => return Err(malformed()),
        };

        let cond = self.eval(cond)?;
        if truthy(cond.as_ref()) {
            self.exec_block(then)
        } else if let Some(otherwise) = otherwise {
            self.exec_block(otherwise)
        } else {
            Ok(Flow::Normal)
        }
    }

    /// `(while C BODY...)`
    fn exec_while(&mut self, form: &Branch<'src>) -> RuntimeResult<Flow> {
        let Some((cond, body)) = form.operands().split_first() else {
            return Err(RuntimeError::Malformed {
                keyword: Keyword::While,
                span: form.span,
            });
        };

        loop {
            let value = self.eval(cond)?;
            if !truthy(value.as_ref()) {
                return Ok(Flow::Normal);
            }
            if let Flow::Return(value) = self.exec_sequence(body)? {
                return Ok(Flow::Return(value));
            }
        }
    }

    /// `(for VAR LIST BODY...)`. A non-list LIST runs nothing. The length is
    /// re-read every iteration, so the body may grow or shrink the list.
    fn exec_for(&mut self, form: &Branch<'src>) -> RuntimeResult<Flow> {
        let [var, list, body @ ..] = form.operands() else {
            return Err(RuntimeError::Malformed {
                keyword: Keyword::For,
                span: form.span,
            });
        };
        let slot = local_slot(var)?;

        let Some(Value::List(items)) = self.eval(list)? else {
            return Ok(Flow::Normal);
        };

        let mut idx = 0;
        loop {
            let Some(item) = items.borrow().get(idx).cloned() else {
                return Ok(Flow::Normal);
            };
            self.stack.set(slot, item);
            if let Flow::Return(value) = self.exec_sequence(body)? {
                return Ok(Flow::Return(value));
            }
            idx += 1;
        }
    }

    fn assign(&mut self, target: &Node<'src>, expr: &Node<'src>) -> RuntimeResult<Option<Value>> {
        let slot = local_slot(target)?;
        let value = self.eval(expr)?;
        self.stack.set(slot, value.clone());
        Ok(value)
    }

    fn print(&mut self, value: Option<&Value>, span: Span) -> RuntimeResult<()> {
        let written = match value {
            Some(Value::Str(text)) => self.out.write_all(text.as_bytes()),
            other => writeln!(self.out, "{}", Repr(other)),
        };
        written.map_err(|err| RuntimeError::Output {
            message: err.to_string(),
            span,
        })
    }

    /// Evaluates an expression.
    ///
    /// # Errors
    ///
    /// Returns an error for keywords that produce no value, bad call heads,
    /// wrong operand counts, or anything a nested call raises. Unsupported
    /// operand types are not errors; they evaluate to `None`.
    pub fn eval(&mut self, node: &Node<'src>) -> RuntimeResult<Option<Value>> {
        let form = match node {
            Node::Leaf(leaf) => return self.eval_leaf(leaf),
            Node::Branch(form) => form,
        };

        let head = match form.head() {
            None => return Err(RuntimeError::EmptyForm { span: form.span }),
            Some(Node::Leaf(leaf)) => leaf,
            Some(other) => return Err(RuntimeError::NotCallable { span: other.span() }),
        };

        match head.kind {
            LeafKind::Keyword(keyword) => self.eval_builtin(keyword, form),
            LeafKind::Identifier => {
                let index = function_index(head)?;
                self.call(index, form.operands(), form.span)
            }
            _ => Err(RuntimeError::NotCallable { span: head.span() }),
        }
    }

    fn eval_leaf(&self, leaf: &Leaf<'src>) -> RuntimeResult<Option<Value>> {
        Ok(match &leaf.kind {
            LeafKind::Str(text) => Some(Value::Str(text.clone())),
            LeafKind::Bool(b) => Some(Value::Bool(*b)),
            LeafKind::Null => None,
            LeafKind::Int(n) => Some(Value::Int(*n)),
            LeafKind::Float(x) => Some(Value::Float(*x)),
            LeafKind::Keyword(keyword) => {
                return Err(RuntimeError::KeywordInLeaf {
                    keyword: *keyword,
                    span: leaf.span(),
                });
            }
            LeafKind::Identifier => match leaf.binding {
                Some(Binding::Local(slot)) => self.stack.get(slot),
                Some(Binding::Function(_)) => {
                    return Err(RuntimeError::FunctionAsValue {
                        name: leaf.text().to_string(),
                        span: leaf.span(),
                    });
                }
                None => return Err(unresolved(leaf)),
            },
        })
    }

    fn eval_pair(&mut self, args: &[Node<'src>]) -> RuntimeResult<(Option<Value>, Option<Value>)> {
        let left = self.eval(&args[0])?;
        let right = self.eval(&args[1])?;
        Ok((left, right))
    }

    fn binary(
        &mut self,
        args: &[Node<'src>],
        op: fn(Option<&Value>, Option<&Value>) -> Option<Value>,
    ) -> RuntimeResult<Option<Value>> {
        let (left, right) = self.eval_pair(args)?;
        Ok(op(left.as_ref(), right.as_ref()))
    }

    fn unary<T>(&mut self, args: &[Node<'src>], op: fn(Option<&Value>) -> T) -> RuntimeResult<T> {
        let value = self.eval(&args[0])?;
        Ok(op(value.as_ref()))
    }

    fn eval_builtin(&mut self, keyword: Keyword, form: &Branch<'src>) -> RuntimeResult<Option<Value>> {
        check_arity(keyword, form)?;
        let args = form.operands();

        Ok(match keyword {
            Keyword::Add => self.binary(args, arith::add)?,
            Keyword::Sub if args.len() == 1 => self.unary(args, arith::neg)?,
            Keyword::Sub => self.binary(args, arith::sub)?,
            Keyword::Mul => self.binary(args, arith::mul)?,
            Keyword::Div => self.binary(args, arith::div)?,
            Keyword::Mod => self.binary(args, arith::rem)?,
            Keyword::Eq => {
                let (left, right) = self.eval_pair(args)?;
                Some(Value::Bool(compare::equals(left.as_ref(), right.as_ref())))
            }
            Keyword::Lt => self.binary(args, compare::less)?,
            Keyword::Gt => self.binary(args, compare::greater)?,
            Keyword::Not => match self.eval(&args[0])? {
                Some(Value::Bool(b)) => Some(Value::Bool(!b)),
                _ => None,
            },
            Keyword::And => {
                let left = self.eval(&args[0])?;
                if truthy(left.as_ref()) {
                    self.eval(&args[1])?
                } else {
                    left
                }
            }
            Keyword::Or => {
                let left = self.eval(&args[0])?;
                if truthy(left.as_ref()) {
                    left
                } else {
                    self.eval(&args[1])?
                }
            }
            Keyword::List => {
                let mut items = Vec::with_capacity(args.len());
                for arg in args {
                    items.push(self.eval(arg)?);
                }
                Some(Value::list(items))
            }
            Keyword::Table => {
                let mut table = Table::new();
                for pair in args.chunks(2) {
                    let Some(Value::Str(key)) = self.eval(&pair[0])? else {
                        continue;
                    };
                    let value = self.eval(&pair[1])?;
                    table.set(key, value);
                }
                Some(Value::table(table))
            }
            Keyword::Item => self.binary(args, collection::get_item)?,
            Keyword::Len => self.unary(args, collection::length)?,
            Keyword::Index => self.binary(args, collection::index_of)?,
            Keyword::Bool => Some(self.unary(args, convert::to_bool)?),
            Keyword::Int => self.unary(args, convert::to_int)?,
            Keyword::Float => self.unary(args, convert::to_float)?,
            Keyword::Str => Some(self.unary(args, convert::to_str)?),
            Keyword::Type => Some(self.unary(args, convert::type_of)?),
            Keyword::Ternary => {
                let cond = self.eval(&args[0])?;
                let chosen = if truthy(cond.as_ref()) { &args[1] } else { &args[2] };
                self.eval(chosen)?
            }
            Keyword::Set => self.assign(&args[0], &args[1])?,
            Keyword::Defun
            | Keyword::If
            | Keyword::Else
            | Keyword::While
            | Keyword::For
            | Keyword::Return
            | Keyword::Print
            | Keyword::SetItem
            | Keyword::Push
            | Keyword::Remove => {
                return Err(RuntimeError::NotAnExpression {
                    keyword,
                    span: form.span,
                });
            }
        })
    }
}

fn check_arity(keyword: Keyword, form: &Branch<'_>) -> RuntimeResult<()> {
    let Some(arity) = Arity::of(keyword) else {
        return Ok(());
    };
    let found = form.operands().len();
    if arity.accepts(found) {
        return Ok(());
    }
    Err(match keyword {
        Keyword::Table => RuntimeError::Malformed {
            keyword,
            span: form.span,
        },
        _ => RuntimeError::Arity {
            keyword,
            expected: arity.describe(),
            found,
            span: form.span,
        },
    })
}

fn local_slot(node: &Node<'_>) -> RuntimeResult<usize> {
    match node.as_leaf().and_then(|leaf| leaf.binding) {
        Some(Binding::Local(slot)) => Ok(slot),
        _ => Err(RuntimeError::ExpectedVariable { span: node.span() }),
    }
}

fn function_index(head: &Leaf<'_>) -> RuntimeResult<usize> {
    match head.binding {
        Some(Binding::Function(index)) => Ok(index),
        Some(Binding::Local(_)) => Err(RuntimeError::NotAFunction {
            name: head.text().to_string(),
            span: head.span(),
        }),
        None => Err(unresolved(head)),
    }
}

fn unresolved(leaf: &Leaf<'_>) -> RuntimeError {
    RuntimeError::Unresolved {
        name: leaf.text().to_string(),
        span: leaf.span(),
    }
}

fn statement_leaf(leaf: &Leaf<'_>) -> RuntimeError {
    match leaf.keyword() {
        Some(keyword) => RuntimeError::KeywordInLeaf {
            keyword,
            span: leaf.span(),
        },
        None => RuntimeError::ExpectedStatement { span: leaf.span() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use tessel_syntax::parse;

    fn run(source: &str) -> RuntimeResult<String> {
        let program = resolve(parse(source).unwrap()).unwrap();
        let mut interpreter = Interpreter::new(&program, Vec::new(), Config::default());
        interpreter.run()?;
        assert!(interpreter.stack().is_empty());
        Ok(String::from_utf8(interpreter.into_output()).unwrap())
    }

    fn output(source: &str) -> String {
        run(source).unwrap()
    }

    #[test]
    fn test_block_shapes() {
        assert_eq!(output("(defun (main) ((print \"a\") (print \"b\")))"), "ab");
        assert_eq!(output("(defun (main) () (print \"x\"))"), "x");
        assert_eq!(output("(defun (main) (if true ((print 1) (print 2))))"), "1\n2\n");
    }

    #[test]
    fn test_if_shapes() {
        assert_eq!(output("(defun (main) (if false (print 1) else (print 2)))"), "2\n");
        assert_eq!(output("(defun (main) (if 1 (print 1) (print 2)))"), "1\n");
        assert_eq!(output("(defun (main) (if null (print 1)))"), "");
        assert!(matches!(
            run("(defun (main) (if true))"),
            Err(RuntimeError::Malformed { keyword: Keyword::If, .. })
        ));
        assert!(matches!(
            run("(defun (main) (if true (print 1) else))"),
            Err(RuntimeError::Malformed { .. })
        ));
        assert!(matches!(
            run("(defun (main) (if true (print 1) (print 2) (print 3)))"),
            Err(RuntimeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_short_circuit_returns_operand() {
        assert_eq!(output("(defun (main) (print (& 0 (undefined))))"), "0\n");
        assert_eq!(output("(defun (main) (print (| \"\" 7)))"), "7\n");
        assert_eq!(output("(defun (main) (print (| 3 (x))))"), "3\n");
    }

    #[test]
    fn test_ternary_is_lazy() {
        assert_eq!(
            output("(defun (main) (set n 0) (print (ternary true 1 (set n 5))) (print n))"),
            "1\n0\n"
        );
    }

    #[test]
    fn test_set_yields_value() {
        assert_eq!(output("(defun (main) (print (+ (set a 2) a)))"), "4\n");
    }

    #[test]
    fn test_leaf_statement_is_fatal() {
        assert!(matches!(
            run("(defun (main) x)"),
            Err(RuntimeError::ExpectedStatement { .. })
        ));
        assert!(matches!(
            run("(defun (main) print)"),
            Err(RuntimeError::KeywordInLeaf { keyword: Keyword::Print, .. })
        ));
    }

    #[test]
    fn test_expression_as_statement_is_fatal() {
        assert!(matches!(
            run("(defun (main) (+ 1 2))"),
            Err(RuntimeError::NotAStatement { keyword: Keyword::Add, .. })
        ));
        assert!(matches!(
            run("(defun (main) (print (print 1)))"),
            Err(RuntimeError::NotAnExpression { keyword: Keyword::Print, .. })
        ));
    }

    #[test]
    fn test_arity_errors() {
        let err = run("(defun (main) (print (+ 1 2 3)))").unwrap_err();
        assert_eq!(err.to_string(), "'+' takes 2 operand(s), 3 given");
        assert!(matches!(
            run("(defun (main) (print (table \"a\")))"),
            Err(RuntimeError::Malformed { keyword: Keyword::Table, .. })
        ));
    }

    #[test]
    fn test_call_errors() {
        assert!(matches!(
            run("(defun (f x) (return x)) (defun (main) (print (f)))"),
            Err(RuntimeError::ArgumentCount { expected: 1, found: 0, .. })
        ));
        assert!(matches!(
            run("(defun (f) (return)) (defun (main) (print f))"),
            Err(RuntimeError::FunctionAsValue { .. })
        ));
        assert!(matches!(
            run("(defun (main) (set g 1) (g))"),
            Err(RuntimeError::NotAFunction { .. })
        ));
        assert!(matches!(
            run("(defun (main) (print ()))"),
            Err(RuntimeError::EmptyForm { .. })
        ));
        assert!(matches!(
            run("(defun (main) (print (1 2)))"),
            Err(RuntimeError::NotCallable { .. })
        ));
        assert!(matches!(
            run("(defun (main) (set 1 2))"),
            Err(RuntimeError::ExpectedVariable { .. })
        ));
    }

    #[test]
    fn test_call_depth_limit() {
        let program =
            resolve(parse("(defun (down n) (down (+ n 1))) (defun (main) (down 0))").unwrap())
                .unwrap();
        let config = Config {
            max_call_depth: Some(50),
        };
        let mut interpreter = Interpreter::new(&program, Vec::new(), config);
        let err = interpreter.run().unwrap_err();
        assert!(matches!(err, RuntimeError::CallDepthExceeded { limit: 50, .. }));
        assert!(interpreter.stack().is_empty());
    }

    #[test]
    fn test_main_result() {
        let program = resolve(parse("(defun (main) (return 9))").unwrap()).unwrap();
        let mut interpreter = Interpreter::new(&program, Vec::new(), Config::default());
        assert!(matches!(interpreter.run(), Ok(Some(Value::Int(9)))));
    }
}
