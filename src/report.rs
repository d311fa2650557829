use std::io::{self, Write};

use kinefit_kinematics::KinematicModel;

/// Decimal places used for every coefficient and evaluated quantity.
pub const PRECISION: usize = 5;

/// Writes the fitted acceleration coefficients and the derived velocity and
/// position polynomials.
///
/// Velocity and position terms pinned to zero by `v(0) = 0` and `x(0) = 0`
/// are left out.
pub fn write_report<W: Write>(out: &mut W, model: &KinematicModel) -> io::Result<()> {
    let acceleration = model.acceleration();
    let degree = acceleration.degree();

    writeln!(
        out,
        "Fitted acceleration coefficients (a(t) = {}):",
        symbolic_terms(degree)
    )?;
    for power in (0..=degree).rev() {
        writeln!(
            out,
            "  C{} = {:.*}",
            power,
            PRECISION,
            acceleration.coefficient(power)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Derived velocity polynomial v(t) (with v(0)=0):")?;
    writeln!(out, "  v(t) = {}", model.velocity().terms(1, PRECISION))?;
    writeln!(out)?;

    writeln!(out, "Derived position polynomial x(t) (with x(0)=0):")?;
    writeln!(out, "  x(t) = {}", model.position().terms(2, PRECISION))?;
    writeln!(out)?;

    Ok(())
}

/// `C3*t^3 + C2*t^2 + C1*t + C0` for degree 3.
fn symbolic_terms(degree: usize) -> String {
    (0..=degree)
        .rev()
        .map(|power| match power {
            0 => "C0".to_string(),
            1 => "C1*t".to_string(),
            _ => format!("C{power}*t^{power}"),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}
