//! Name resolution.
//!
//! Runs in two passes over the top-level `defun` forms:
//!
//! - Pass 1: collect every function signature into the function table
//!   (`main` always at index 0) and stamp each prototype with its index.
//! - Pass 2: walk each function's prototype and body, binding every
//!   identifier either to a function or to a local slot. Slots are handed out
//!   in first-use order, so parameters take `0..arity`. The `defun` form is
//!   stamped with the function's slot count.
//!
//! Top-level forms that are not `defun`s are ignored.

use crate::error::ResolveError;
use tessel_mem::Interner;
use tessel_syntax::pretty::write_branch;
use tessel_syntax::{Binding, Branch, Keyword, Node, Span, Spanned};

/// Name of the entry point.
pub const MAIN: &str = "main";

/// One entry of the function table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function<'src> {
    /// Declared name
    pub name: &'src str,

    /// Index of the `defun` form among the root's children
    pub form: usize,

    /// Parameter count
    pub arity: usize,

    /// Slot count, parameters included
    pub locals: usize,

    /// The name in the prototype
    pub span: Span,
}

/// A resolved program: the annotated tree plus its function table.
#[derive(Debug, Clone)]
pub struct Program<'src> {
    root: Branch<'src>,
    functions: Vec<Function<'src>>,
}

impl<'src> Program<'src> {
    /// The annotated root.
    #[must_use]
    pub fn root(&self) -> &Branch<'src> {
        &self.root
    }

    /// The function table, `main` first.
    #[must_use]
    pub fn functions(&self) -> &[Function<'src>] {
        &self.functions
    }

    /// Looks up a function by index.
    #[must_use]
    pub fn function(&self, index: usize) -> Option<&Function<'src>> {
        self.functions.get(index)
    }

    /// Looks up a function index by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.functions.iter().position(|f| f.name == name)
    }

    /// The annotated tree in dump form.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_branch(&mut out, &self.root);
        out
    }

    /// Body statements of function `index`.
    #[must_use]
    pub fn body(&self, index: usize) -> &[Node<'src>] {
        self.function(index)
            .and_then(|f| self.root.children.get(f.form))
            .and_then(Node::as_branch)
            .and_then(|form| form.children.get(2..))
            .unwrap_or_default()
    }
}

/// Resolves a parsed tree into a [`Program`].
///
/// # Errors
///
/// Returns a [`ResolveError`] for a malformed `defun`, a duplicated or
/// missing `main`, a redeclared function, or a bad parameter list.
pub fn resolve(root: Node<'_>) -> Result<Program<'_>, ResolveError> {
    let mut root = match root {
        Node::Branch(branch) => branch,
        Node::Leaf(leaf) => return Err(ResolveError::MissingMain { span: leaf.span() }),
    };

    let mut names = Interner::with_reserved(&[MAIN]);
    let mut functions = collect_signatures(&mut root, &mut names)?;

    let mut locals = Interner::new();
    for (index, function) in functions.iter_mut().enumerate() {
        let Some(form) = root.children.get_mut(function.form).and_then(Node::as_branch_mut)
        else {
            continue;
        };

        locals.clear();
        bind_function(form, &names, &mut locals)?;
        function.locals = locals.len();
        form.id = Some(function.locals);

        tessel_log::debug!(
            "function {} '{}': arity {} locals {}",
            index,
            function.name,
            function.arity,
            function.locals
        );
    }

    Ok(Program { root, functions })
}

fn collect_signatures<'src>(
    root: &mut Branch<'src>,
    names: &mut Interner<'src>,
) -> Result<Vec<Function<'src>>, ResolveError> {
    let mut slots: Vec<Option<Function<'src>>> = vec![None];

    for (form_index, node) in root.children.iter_mut().enumerate() {
        let Some(form) = node.as_branch_mut() else {
            continue;
        };
        if form.head_keyword() != Some(Keyword::Defun) {
            continue;
        }

        let form_span = form.span;
        let proto = match form.children.get_mut(1) {
            Some(Node::Branch(proto)) => proto,
            Some(other) => return Err(ResolveError::ExpectedPrototype { span: other.span() }),
            None => return Err(ResolveError::MalformedDefun { span: form_span }),
        };

        let Some((name, span)) = proto
            .head()
            .and_then(Node::as_leaf)
            .and_then(|leaf| Some((leaf.identifier()?, leaf.span())))
        else {
            return Err(ResolveError::ExpectedFunctionName { span: proto.span });
        };

        let index = if name == MAIN {
            if slots[0].is_some() {
                return Err(ResolveError::DuplicateMain { span });
            }
            0
        } else {
            if names.contains(name) {
                return Err(ResolveError::DuplicateFunction {
                    name: name.to_string(),
                    span,
                });
            }
            names.intern(name);
            slots.push(None);
            slots.len() - 1
        };

        proto.id = Some(index);
        slots[index] = Some(Function {
            name,
            form: form_index,
            arity: proto.children.len() - 1,
            locals: 0,
            span,
        });
    }

    slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(ResolveError::MissingMain { span: root.span })
}

fn bind_function<'src>(
    form: &mut Branch<'src>,
    functions: &Interner<'src>,
    locals: &mut Interner<'src>,
) -> Result<(), ResolveError> {
    let (head, body) = form.children.split_at_mut(2);
    let Some(proto) = head[1].as_branch_mut() else {
        return Err(ResolveError::ExpectedPrototype { span: head[1].span() });
    };

    let (name, params) = proto.children.split_at_mut(1);
    bind_tree(&mut name[0], functions, locals);

    for param in params {
        let Some(leaf) = param.as_leaf_mut() else {
            return Err(ResolveError::ExpectedParameter { span: param.span() });
        };
        let Some(text) = leaf.identifier() else {
            return Err(ResolveError::ExpectedParameter { span: leaf.span() });
        };
        if functions.contains(text) {
            return Err(ResolveError::ParameterShadowsFunction {
                name: text.to_string(),
                span: leaf.span(),
            });
        }
        if locals.contains(text) {
            return Err(ResolveError::DuplicateParameter {
                name: text.to_string(),
                span: leaf.span(),
            });
        }
        let slot = locals.intern(text).index();
        leaf.binding = Some(Binding::Local(slot));
        tessel_log::trace!("param '{}' -> slot {}", text, slot);
    }

    for node in body {
        bind_tree(node, functions, locals);
    }
    Ok(())
}

/// Binds every identifier under `node`, in source order.
fn bind_tree<'src>(node: &mut Node<'src>, functions: &Interner<'src>, locals: &mut Interner<'src>) {
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        match node {
            Node::Leaf(leaf) => {
                let Some(text) = leaf.identifier() else {
                    continue;
                };
                let binding = match functions.lookup(text) {
                    Some(sym) => Binding::Function(sym.index()),
                    None => Binding::Local(locals.intern(text).index()),
                };
                tessel_log::trace!("'{}' at {} -> {:?}", text, leaf.span(), binding);
                leaf.binding = Some(binding);
            }
            Node::Branch(branch) => pending.extend(branch.children.iter_mut().rev()),
        }
    }
}
