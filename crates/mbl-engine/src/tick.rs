//! The tick engine: one synchronous transition of a board instance,
//! including delegating to an active callee and harvesting its outputs
//! when it terminates.

use rand::Rng;

use mbl_board::{Board, Device, Grid, PortKind};

use crate::context::InterpreterContext;
use crate::instance::{BoardInstance, CallFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Running,
    Terminated,
}

/// Advance `instance` by one tick. If a callee is active, this advances
/// the callee instead and, on its termination, harvests its outputs into
/// `instance` — `instance`'s own `tick_count` does not advance on such a
/// tick.
pub fn tick(instance: &mut BoardInstance, ctx: &mut InterpreterContext) -> TickResult {
    if !instance.call_queue.is_empty() {
        let top = instance.call_queue.len() - 1;
        let callee_result = tick(&mut instance.call_queue[top].instance, ctx);
        if callee_result == TickResult::Terminated {
            let frame = instance.call_queue.pop().expect("checked non-empty above");
            tracing::trace!(
                target: "mbl_engine::call",
                parent = %instance.template.name,
                callee = %frame.instance.template.name,
                depth = frame.instance.recursion_depth,
                "call returns"
            );
            deposit_callee_outputs(instance, frame, ctx);
        }
        return TickResult::Running;
    }
    own_transition(instance, ctx)
}

fn own_transition(instance: &mut BoardInstance, ctx: &mut InterpreterContext) -> TickResult {
    if !instance.template.outputs.is_empty() {
        let all_filled = instance.template.outputs.values().all(|coords| {
            coords
                .iter()
                .any(|&(y, x)| instance.marbles.get(y, x).is_some())
        });
        if all_filled {
            trace_termination(instance, ctx, "filled output ports");
            return TickResult::Terminated;
        }
    }

    let width = instance.template.width;
    let height = instance.template.height;
    let mut next_marbles: Grid<Option<u8>> = Grid::filled(width, height, None);
    let mut exit_now = false;
    let mut hidden_activity = false;

    for y in 0..height {
        for x in 0..width {
            let Some(m) = *instance.marbles.get(y, x) else {
                continue;
            };
            let device = *instance.template.devices.get(y, x);
            apply_device(
                instance,
                ctx,
                &mut next_marbles,
                &mut exit_now,
                &mut hidden_activity,
                y,
                x,
                m,
                device,
            );
        }
    }

    for call_site in instance.template.call_sites.clone() {
        let Some(callee_template) = ctx.registry.get(&call_site.callee) else {
            continue;
        };
        let all_filled = callee_template.inputs.keys().all(|&i| {
            instance
                .marbles
                .get(call_site.row, call_site.col + i as usize)
                .is_some()
        });
        if all_filled {
            let mut callee_instance =
                BoardInstance::from_template(callee_template, instance.recursion_depth + 1);
            for &i in callee_template.inputs.keys() {
                if let Some(value) = *instance.marbles.get(call_site.row, call_site.col + i as usize) {
                    callee_instance.populate_input(i, value);
                }
            }
            tracing::trace!(
                target: "mbl_engine::call",
                parent = %instance.template.name,
                callee = %call_site.callee,
                row = call_site.row,
                col = call_site.col,
                "call pushed"
            );
            instance.call_queue.push(CallFrame {
                anchor_row: call_site.row,
                anchor_col: call_site.col,
                instance: callee_instance,
            });
            hidden_activity = true;
        } else {
            for i in 0..callee_template.function_width {
                let col = call_site.col + i;
                if col >= width {
                    continue;
                }
                if let Some(value) = *instance.marbles.get(call_site.row, col) {
                    merge_into(&mut next_marbles, call_site.row, col, value);
                }
            }
        }
    }

    let changed = next_marbles != instance.marbles;
    if !changed && !hidden_activity {
        trace_termination(instance, ctx, "lack of activity");
        return TickResult::Terminated;
    }
    if exit_now {
        trace_termination(instance, ctx, "an exit device");
        return TickResult::Terminated;
    }
    instance.marbles = next_marbles;
    instance.tick_count += 1;
    TickResult::Running
}

fn trace_termination(instance: &BoardInstance, ctx: &mut InterpreterContext, reason: &str) {
    if ctx.verbosity > 0 {
        ctx.trace.emit(
            instance.recursion_depth,
            &format!(
                "Exiting board {} on tick {} due to {}",
                instance.template.name, instance.tick_count, reason
            ),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_device(
    instance: &mut BoardInstance,
    ctx: &mut InterpreterContext,
    next_marbles: &mut Grid<Option<u8>>,
    exit_now: &mut bool,
    hidden_activity: &mut bool,
    y: usize,
    x: usize,
    m: u8,
    device: Option<Device>,
) {
    let width = instance.template.width;
    let height = instance.template.height;
    match device {
        // No recognized device here. A cell with no instruction text at
        // all is a marble's own origin cell, which falls like `Device::Pass`;
        // a cell with unrecognized text (call-site lettering not claimed
        // this tick, or plain garbage) defaults to trash.
        None => {
            if instance.template.device_text.get(y, x).is_none() {
                fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height);
            }
        }
        Some(Device::Trash) => {}
        Some(Device::Pass) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height),
        Some(Device::DivertRight) => go_right(next_marbles, y, x, width, m),
        Some(Device::DivertLeft) => go_left(next_marbles, y, x, m),
        Some(Device::Split) => {
            go_left(next_marbles, y, x, m);
            go_right(next_marbles, y, x, width, m);
        }
        Some(Device::Increment) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m.wrapping_add(1), height),
        Some(Device::Decrement) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m.wrapping_sub(1), height),
        Some(Device::ShiftLeft) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m << 1, height),
        Some(Device::ShiftRight) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m >> 1, height),
        Some(Device::BitwiseNot) => fall(instance, ctx, next_marbles, hidden_activity, y, x, !m, height),
        Some(Device::Exit) => {
            *exit_now = true;
        }
        Some(Device::StdinRead) => match ctx.stdin.try_read_byte() {
            Some(byte) => fall(instance, ctx, next_marbles, hidden_activity, y, x, byte, height),
            None => go_right(next_marbles, y, x, width, m),
        },
        Some(Device::BitExtract(n)) => fall(instance, ctx, next_marbles, hidden_activity, y, x, (m >> n) & 1, height),
        Some(Device::AddConst(n)) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m.wrapping_add(n), height),
        Some(Device::SubConst(n)) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m.wrapping_sub(n), height),
        Some(Device::CompareEq(n)) => {
            if m == n {
                go_right(next_marbles, y, x, width, m);
            } else {
                fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height);
            }
        }
        Some(Device::CompareGt(n)) => {
            if m > n {
                go_right(next_marbles, y, x, width, m);
            } else {
                fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height);
            }
        }
        Some(Device::CompareLt(n)) => {
            if m < n {
                go_right(next_marbles, y, x, width, m);
            } else {
                fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height);
            }
        }
        Some(Device::RandomRange(n)) => {
            let value = ctx.rng.gen_range(0..=n);
            fall(instance, ctx, next_marbles, hidden_activity, y, x, value, height);
        }
        Some(Device::RandomUpToMarble) => {
            let value = ctx.rng.gen_range(0..=m);
            fall(instance, ctx, next_marbles, hidden_activity, y, x, value, height);
        }
        Some(Device::Portal(n)) => {
            let partners = other_cells_with(&instance.template, Device::Portal(n), (y, x));
            let (ty, tx) = if partners.is_empty() {
                (y, x)
            } else {
                partners[ctx.rng.gen_range(0..partners.len())]
            };
            fall(instance, ctx, next_marbles, hidden_activity, ty, tx, m, height);
        }
        Some(Device::Sync(n)) => {
            let partners = other_cells_with(&instance.template, Device::Sync(n), (y, x));
            let release = partners
                .iter()
                .all(|&(k, j)| instance.marbles.get(k, j).is_some());
            if release {
                fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height);
            } else {
                merge_into(next_marbles, y, x, m);
            }
        }
        Some(Device::InputPort(_)) => fall(instance, ctx, next_marbles, hidden_activity, y, x, m, height),
        Some(Device::OutputPort(_)) => merge_into(next_marbles, y, x, m),
    }
}

#[allow(clippy::too_many_arguments)]
fn fall(
    instance: &mut BoardInstance,
    ctx: &mut InterpreterContext,
    next_marbles: &mut Grid<Option<u8>>,
    hidden_activity: &mut bool,
    y: usize,
    x: usize,
    value: u8,
    height: usize,
) {
    if y == height - 1 {
        emit_byte(instance, ctx, value);
        *hidden_activity = true;
    } else {
        merge_into(next_marbles, y + 1, x, value);
    }
}

fn go_right(next_marbles: &mut Grid<Option<u8>>, y: usize, x: usize, width: usize, value: u8) {
    if x + 1 < width {
        merge_into(next_marbles, y, x + 1, value);
    }
}

fn go_left(next_marbles: &mut Grid<Option<u8>>, y: usize, x: usize, value: u8) {
    if x > 0 {
        merge_into(next_marbles, y, x - 1, value);
    }
}

fn merge_into(grid: &mut Grid<Option<u8>>, y: usize, x: usize, value: u8) {
    let slot = grid.get_mut(y, x);
    *slot = Some(match *slot {
        Some(existing) => existing.wrapping_add(value),
        None => value,
    });
}

fn emit_byte(instance: &mut BoardInstance, ctx: &mut InterpreterContext, byte: u8) {
    if ctx.verbosity > 0 {
        instance.buffered_stdout.push(byte);
    } else {
        ctx.stdout.write_byte(byte);
    }
}

fn other_cells_with(template: &Board, want: Device, exclude: (usize, usize)) -> Vec<(usize, usize)> {
    template
        .devices
        .iter_cells()
        .filter_map(|(y, x, d)| {
            if (y, x) != exclude && *d == Some(want) {
                Some((y, x))
            } else {
                None
            }
        })
        .collect()
}

fn sum_outputs(marbles: &Grid<Option<u8>>, coords: &[(usize, usize)]) -> (u8, bool) {
    let mut sum = 0u8;
    let mut found = false;
    for &(y, x) in coords {
        if let Some(v) = *marbles.get(y, x) {
            sum = sum.wrapping_add(v);
            found = true;
        }
    }
    (sum, found)
}

fn deposit_callee_outputs(parent: &mut BoardInstance, frame: CallFrame, ctx: &mut InterpreterContext) {
    let CallFrame {
        anchor_row,
        anchor_col,
        instance: callee,
    } = frame;
    let callee_template = callee.template.clone();
    let at_parent_bottom = anchor_row == parent.template.height - 1;

    for n in callee_template.indexed_output_ports() {
        if let Some(coords) = callee_template.outputs.get(&PortKind::Indexed(n)) {
            let (sum, found) = sum_outputs(&callee.marbles, coords);
            if found {
                if at_parent_bottom {
                    emit_byte(parent, ctx, sum);
                } else {
                    merge_into(&mut parent.marbles, anchor_row + 1, anchor_col + n as usize, sum);
                }
            }
        }
    }

    if let Some(coords) = callee_template.outputs.get(&PortKind::LeftReturn) {
        let (sum, found) = sum_outputs(&callee.marbles, coords);
        if found && anchor_col > 0 {
            merge_into(&mut parent.marbles, anchor_row, anchor_col - 1, sum);
        }
    }

    if let Some(coords) = callee_template.outputs.get(&PortKind::RightReturn) {
        let (sum, found) = sum_outputs(&callee.marbles, coords);
        if found {
            let target_col = anchor_col + callee_template.function_width;
            if target_col < parent.template.width {
                merge_into(&mut parent.marbles, anchor_row, target_col, sum);
            }
        }
    }

    parent.buffered_stdout.extend(callee.buffered_stdout);
}
