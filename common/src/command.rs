//! Hierarchical single-key command tree and the dispatcher that walks it.
//!
//! The tree is built once through [`CommandTreeBuilder`] and is immutable
//! afterwards. Nodes live in a flat arena and refer to each other by
//! [`NodeId`]; the dispatcher's position is just an id into that arena.
//!
//! Handlers receive the caller's context (`&mut C`) explicitly, so the tree
//! itself holds no application state.

use crate::keys::{normalize, Key, KeyCode};
use crate::report::{MenuEntry, MenuView, Reporter};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Menu,
    Action,
    InputPrompt,
}

pub type ActionFn<C> = Rc<dyn Fn(&mut C)>;
pub type CompletionFn<C> = Rc<dyn Fn(&mut C, &str)>;
/// Must be pure: the same key is always accepted or always rejected.
pub type Validator = fn(Key) -> bool;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("key '{key}' is already bound in menu '{menu}'")]
    DuplicateKey { menu: String, key: char },
    #[error("'{0}' is not a menu and cannot hold bindings")]
    NotAMenu(String),
    #[error("node {0:?} does not belong to this tree")]
    UnknownNode(NodeId),
}

enum Target<C> {
    Node(NodeId),
    Action(ActionFn<C>),
}

struct Binding<C> {
    key: char,
    name: String,
    help: Option<String>,
    target: Target<C>,
}

enum NodeKind<C> {
    Menu {
        bindings: Vec<Binding<C>>,
    },
    InputPrompt {
        validate: Validator,
        complete: CompletionFn<C>,
    },
}

pub struct CommandNode<C> {
    name: String,
    help: Option<String>,
    kind: NodeKind<C>,
}

impl<C> CommandNode<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn kind(&self) -> CommandKind {
        match self.kind {
            NodeKind::Menu { .. } => CommandKind::Menu,
            NodeKind::InputPrompt { .. } => CommandKind::InputPrompt,
        }
    }

    fn binding(&self, key: Key) -> Option<&Binding<C>> {
        let c = key.as_char()?;
        match &self.kind {
            NodeKind::Menu { bindings } => bindings.iter().find(|b| b.key == c),
            NodeKind::InputPrompt { .. } => None,
        }
    }
}

pub struct CommandTree<C> {
    nodes: Vec<CommandNode<C>>,
}

impl<C> CommandTree<C> {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &CommandNode<C> {
        &self.nodes[id.0]
    }

    /// Bound keys of a node in registration order. Empty for input prompts.
    pub fn entries(&self, id: NodeId) -> Vec<MenuEntry> {
        let NodeKind::Menu { bindings } = &self.node(id).kind else {
            return Vec::new();
        };

        bindings
            .iter()
            .map(|b| MenuEntry {
                key: b.key,
                name: b.name.clone(),
                help: b.help.clone(),
                kind: match &b.target {
                    Target::Node(child) => self.node(*child).kind(),
                    Target::Action(_) => CommandKind::Action,
                },
            })
            .collect()
    }

    pub fn view(&self, id: NodeId, input: Option<&str>) -> MenuView {
        MenuView {
            title: self.node(id).name.clone(),
            entries: self.entries(id),
            input: input.map(str::to_string),
        }
    }
}

pub struct CommandTreeBuilder<C> {
    nodes: Vec<CommandNode<C>>,
}

impl<C> CommandTreeBuilder<C> {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![CommandNode {
                name: root_name.into(),
                help: None,
                kind: NodeKind::Menu {
                    bindings: Vec::new(),
                },
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Bind `key` in `parent` to a new submenu and return its id.
    pub fn menu(
        &mut self,
        parent: NodeId,
        key: char,
        name: &str,
        help: Option<&str>,
    ) -> Result<NodeId, TreeError> {
        self.check_slot(parent, key)?;
        let id = self.push_node(
            name,
            help,
            NodeKind::Menu {
                bindings: Vec::new(),
            },
        );
        self.bind(parent, key, name, help, Target::Node(id))?;
        Ok(id)
    }

    /// Bind `key` in `parent` to a new input prompt.
    pub fn input(
        &mut self,
        parent: NodeId,
        key: char,
        name: &str,
        help: Option<&str>,
        validate: Validator,
        complete: impl Fn(&mut C, &str) + 'static,
    ) -> Result<NodeId, TreeError> {
        self.check_slot(parent, key)?;
        let id = self.push_node(
            name,
            help,
            NodeKind::InputPrompt {
                validate,
                complete: Rc::new(complete),
            },
        );
        self.bind(parent, key, name, help, Target::Node(id))?;
        Ok(id)
    }

    /// Bind `key` in `parent` to a zero-argument action.
    pub fn action(
        &mut self,
        parent: NodeId,
        key: char,
        name: &str,
        help: Option<&str>,
        action: impl Fn(&mut C) + 'static,
    ) -> Result<(), TreeError> {
        self.bind(parent, key, name, help, Target::Action(Rc::new(action)))
    }

    pub fn build(self) -> CommandTree<C> {
        CommandTree { nodes: self.nodes }
    }

    fn push_node(&mut self, name: &str, help: Option<&str>, kind: NodeKind<C>) -> NodeId {
        self.nodes.push(CommandNode {
            name: name.to_string(),
            help: help.map(str::to_string),
            kind,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn check_slot(&self, parent: NodeId, key: char) -> Result<(), TreeError> {
        let node = self
            .nodes
            .get(parent.0)
            .ok_or(TreeError::UnknownNode(parent))?;
        match &node.kind {
            NodeKind::Menu { bindings } => {
                if bindings.iter().any(|b| b.key == key) {
                    Err(TreeError::DuplicateKey {
                        menu: node.name.clone(),
                        key,
                    })
                } else {
                    Ok(())
                }
            }
            NodeKind::InputPrompt { .. } => Err(TreeError::NotAMenu(node.name.clone())),
        }
    }

    fn bind(
        &mut self,
        parent: NodeId,
        key: char,
        name: &str,
        help: Option<&str>,
        target: Target<C>,
    ) -> Result<(), TreeError> {
        self.check_slot(parent, key)?;
        if let NodeKind::Menu { bindings } = &mut self.nodes[parent.0].kind {
            bindings.push(Binding {
                key,
                name: name.to_string(),
                help: help.map(str::to_string),
                target,
            });
        }
        Ok(())
    }
}

enum Transition<C> {
    Ignore,
    Append(char),
    Complete(CompletionFn<C>),
    Descend(NodeId),
    Invoke(ActionFn<C>),
}

/// Routes normalized keys through a [`CommandTree`].
///
/// Nothing here returns an error: keys that mean nothing in the current
/// position are dropped.
pub struct CommandDispatcher<C> {
    tree: CommandTree<C>,
    active: NodeId,
    buffer: String,
    terminator: Key,
    reporter: Reporter,
}

impl<C> CommandDispatcher<C> {
    pub fn new(tree: CommandTree<C>, reporter: Reporter) -> Self {
        let dispatcher = Self {
            active: tree.root(),
            tree,
            buffer: String::new(),
            terminator: Key::Enter,
            reporter,
        };
        dispatcher.report_bindings();
        dispatcher
    }

    pub fn tree(&self) -> &CommandTree<C> {
        &self.tree
    }

    pub fn active(&self) -> NodeId {
        self.active
    }

    pub fn active_node(&self) -> &CommandNode<C> {
        self.tree.node(self.active)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_at_root(&self) -> bool {
        self.active == self.tree.root()
    }

    pub fn handle_key(&mut self, code: KeyCode, shift: bool, ctx: &mut C) {
        let key = normalize(code, shift);
        self.handle_normalized(key, ctx);
    }

    pub fn handle_normalized(&mut self, key: Key, ctx: &mut C) {
        match self.transition_for(key) {
            Transition::Ignore => return,
            Transition::Append(c) => {
                self.buffer.push(c);
            }
            Transition::Complete(complete) => {
                let value = std::mem::take(&mut self.buffer);
                log::debug!("input '{}' completed with {:?}", self.active_node().name, value);
                complete(ctx, &value);
                self.active = self.tree.root();
            }
            Transition::Descend(id) => {
                self.active = id;
                if self.tree.node(id).kind() == CommandKind::InputPrompt {
                    self.buffer.clear();
                }
            }
            Transition::Invoke(action) => {
                action(ctx);
                self.active = self.tree.root();
            }
        }
        self.report_bindings();
    }

    pub fn report_bindings(&self) {
        let input = match self.active_node().kind() {
            CommandKind::InputPrompt => Some(self.buffer.as_str()),
            _ => None,
        };
        self.reporter.menu(self.tree.view(self.active, input));
    }

    fn transition_for(&self, key: Key) -> Transition<C> {
        let node = self.active_node();
        match &node.kind {
            NodeKind::InputPrompt { validate, complete } => {
                if key == self.terminator {
                    Transition::Complete(Rc::clone(complete))
                } else {
                    match key {
                        Key::Char(c) if validate(key) => Transition::Append(c),
                        _ => Transition::Ignore,
                    }
                }
            }
            NodeKind::Menu { .. } => match node.binding(key).map(|b| &b.target) {
                Some(Target::Node(id)) => Transition::Descend(*id),
                Some(Target::Action(action)) => Transition::Invoke(Rc::clone(action)),
                None => Transition::Ignore,
            },
        }
    }
}
