use kinefit_kinematics::*;

fn main() {
    let times = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
    let accelerations = vec![2.704, 2.755, 2.646, 1.721, 0.640, 0.379];
    let degree = 3;

    let model_result = SampleSet::new(times, accelerations)
        .and_then(|samples| KinematicModel::from_samples(&samples, degree));

    match model_result {
        Ok(model) => {
            println!("Fitted model:");
            println!("  Domain:       {} s", model.domain());
            println!("  a(t) = {}", model.acceleration().terms(0, 5));
            println!("  v(t) = {}", model.velocity().terms(1, 5));
            println!("  x(t) = {}", model.position().terms(2, 5));
            println!("\nSampling...");

            let steps = 10;
            let end = model.domain().end();
            for i in 0..=steps {
                let t = end * i as f64 / steps as f64;
                match model.evaluate(t) {
                    Ok(state) => println!("Step {:>2}: {}", i, state),
                    Err(e) => {
                        eprintln!("Error at step {}: {}", i, e);
                        break;
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to fit acceleration samples: {}", e);
        }
    }
}
