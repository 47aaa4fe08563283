//! Undo/redo history for structural edits.
//!
//! Every command is recorded as one [`Transaction`]: an ordered group of
//! block-level replace operations. Undo reverts the whole group, so a command
//! is never partially undoable.

use crate::ir::nodes::Block;

/// Default number of transactions kept for undo.
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns true if something was undone.
    fn undo(&mut self) -> bool;

    /// Perform redo. Returns true if something was redone.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// A recorded replacement of top-level blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Index of the first replaced block
    pub index: usize,
    /// Blocks that were removed (empty for pure insertions)
    pub deleted: Vec<Block>,
    /// Blocks that were put in their place
    pub inserted: Vec<Block>,
}

impl EditOperation {
    /// Replace `deleted.len()` blocks at `index` with `inserted`.
    pub fn apply(&self, blocks: &mut Vec<Block>) {
        splice(blocks, self.index, self.deleted.len(), &self.inserted);
    }

    /// Undo [`EditOperation::apply`].
    pub fn revert(&self, blocks: &mut Vec<Block>) {
        splice(blocks, self.index, self.inserted.len(), &self.deleted);
    }
}

fn splice(blocks: &mut Vec<Block>, index: usize, remove: usize, insert: &[Block]) {
    let start = index.min(blocks.len());
    let end = (start + remove).min(blocks.len());
    blocks.splice(start..end, insert.iter().cloned());
}

/// Operations applied together and undone together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    operations: Vec<EditOperation>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `count` blocks starting at `index` and record the change.
    pub fn replace(
        &mut self,
        blocks: &mut Vec<Block>,
        index: usize,
        count: usize,
        inserted: Vec<Block>,
    ) {
        let index = index.min(blocks.len());
        let end = (index + count).min(blocks.len());
        let operation = EditOperation {
            index,
            deleted: blocks[index..end].to_vec(),
            inserted,
        };
        operation.apply(blocks);
        self.operations.push(operation);
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    fn apply(&self, blocks: &mut Vec<Block>) {
        for operation in &self.operations {
            operation.apply(blocks);
        }
    }

    fn revert(&self, blocks: &mut Vec<Block>) {
        for operation in self.operations.iter().rev() {
            operation.revert(blocks);
        }
    }
}

/// Bounded undo and redo stacks of transactions.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    max_steps: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl History {
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Record an already-applied transaction. Empty transactions are ignored.
    pub fn record(&mut self, transaction: Transaction) {
        if transaction.is_empty() {
            return;
        }

        // Clear redo stack on new edit
        self.redo_stack.clear();
        self.undo_stack.push(transaction);

        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Revert the latest transaction on `blocks`.
    pub fn undo(&mut self, blocks: &mut Vec<Block>) -> bool {
        let Some(transaction) = self.undo_stack.pop() else {
            return false;
        };
        transaction.revert(blocks);
        self.redo_stack.push(transaction);
        true
    }

    /// Re-apply the latest undone transaction on `blocks`.
    pub fn redo(&mut self, blocks: &mut Vec<Block>) -> bool {
        let Some(transaction) = self.redo_stack.pop() else {
            return false;
        };
        transaction.apply(blocks);
        self.undo_stack.push(transaction);
        true
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
