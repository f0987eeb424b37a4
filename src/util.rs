use std::fmt::Write;

use glam::Mat4;

/// Pretty print a matrix column by column for the debug log.
pub fn format_mat4(name: &str, mat: &Mat4) -> String {
    let mut output = format!("{}:\n", name);
    let columns = [
        ("x_axis", mat.x_axis),
        ("y_axis", mat.y_axis),
        ("z_axis", mat.z_axis),
        ("w_axis", mat.w_axis),
    ];
    for (label, col) in columns {
        // writing into a String cannot fail
        let _ = writeln!(
            output,
            "{}: [{:8.3},{:8.3},{:8.3},{:8.3}]",
            label, col.x, col.y, col.z, col.w
        );
    }
    output
}
