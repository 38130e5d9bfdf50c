use mbl_board::{Board, Grid};

/// A mutable, owned playthrough of a [`Board`] template — the only thing a
/// tick ever mutates. Created fresh (a deep clone of the template) every
/// time a board is invoked, whether as the root run or as a callee.
#[derive(Debug, Clone)]
pub struct BoardInstance {
    pub template: Board,
    pub marbles: Grid<Option<u8>>,
    pub tick_count: u64,
    pub recursion_depth: usize,
    pub call_queue: Vec<CallFrame>,
    /// Bytes emitted via the bottom edge while verbosity defers real
    /// stdout writes; flushed by the caller once this instance, and
    /// everything it called, has fully unwound.
    pub buffered_stdout: Vec<u8>,
}

/// An active callee on a parent's [`BoardInstance::call_queue`], tagged
/// with the (row, leftmost column) of the call site that spawned it.
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub anchor_row: usize,
    pub anchor_col: usize,
    pub instance: BoardInstance,
}

impl BoardInstance {
    pub fn from_template(board: &Board, recursion_depth: usize) -> Self {
        Self {
            marbles: board.initial_marbles.clone(),
            template: board.clone(),
            tick_count: 0,
            recursion_depth,
            call_queue: Vec::new(),
            buffered_stdout: Vec::new(),
        }
    }

    /// Set every coordinate registered for input port `n` to `value`,
    /// mirroring the reference interpreter's `populate_input`.
    pub fn populate_input(&mut self, n: u8, value: u8) {
        if let Some(coords) = self.template.inputs.get(&n).cloned() {
            for (y, x) in coords {
                self.marbles.set(y, x, Some(value));
            }
        }
    }
}
