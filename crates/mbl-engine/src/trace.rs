//! Verbose board-dump rendering (§6.4): at verbosity ≥ 3, the CLI calls
//! [`dump_active_chain`] after every top-level tick to render the root
//! board and whichever chain of callees is currently active underneath it.

use crate::instance::BoardInstance;
use crate::io::TraceSink;

pub fn dump_active_chain(instance: &BoardInstance, trace: &mut dyn TraceSink) {
    dump_one(instance, trace);
    if let Some(frame) = instance.call_queue.last() {
        dump_active_chain(&frame.instance, trace);
    }
}

fn dump_one(instance: &BoardInstance, trace: &mut dyn TraceSink) {
    trace.emit(
        instance.recursion_depth,
        &format!(":{} tick {}", instance.template.name, instance.tick_count),
    );
    for y in 0..instance.template.height {
        let mut line = String::new();
        for x in 0..instance.template.width {
            if let Some(m) = *instance.marbles.get(y, x) {
                line.push_str(&format!("{:02X}", m));
            } else if let Some(device) = instance.template.devices.get(y, x) {
                line.push_str(&device.to_string());
            } else {
                line.push_str("..");
            }
            line.push(' ');
        }
        trace.emit(instance.recursion_depth, line.trim_end());
    }
}
