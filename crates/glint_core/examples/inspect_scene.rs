//! Example: Load and inspect a scene description.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.txt

use std::env;

use glint_core::description::{load_description, ShapeRecord};
use glint_core::MeshData;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/spheres.txt");
        println!("  cargo run --example inspect_scene -- scenes/glass.json");
        return;
    }

    let path = std::path::Path::new(&args[1]);
    println!("Loading scene description: {}", path.display());

    let description = match load_description(path) {
        Ok(description) => description,
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            return;
        }
    };

    println!("\n--- Materials ---");
    for material in &description.materials {
        println!(
            "  {} {} diffuse ({:.2}, {:.2}, {:.2}) spec {} ks {:.2} ior {:.2} texture {}",
            material.name,
            material.kind,
            material.diffuse[0],
            material.diffuse[1],
            material.diffuse[2],
            material.specular,
            material.ks,
            material.ior,
            material.texture.as_deref().unwrap_or("-")
        );
    }

    println!("\n--- Shapes ---");
    let base_dir = path.parent().unwrap_or(std::path::Path::new("."));
    for (i, shape) in description.shapes.iter().enumerate() {
        println!("  [{}] {} ({})", i, shape.kind_name(), shape.material());
        if let ShapeRecord::Mesh { path: mesh_path, .. } = shape {
            match MeshData::load_obj(&base_dir.join(mesh_path)) {
                Ok(mesh) => {
                    let bounds = mesh.bounds();
                    println!(
                        "       {} vertices, {} faces, {} triangles",
                        mesh.vertex_count(),
                        mesh.face_count(),
                        mesh.triangle_count()
                    );
                    println!(
                        "       Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                        bounds.x.min, bounds.y.min, bounds.z.min,
                        bounds.x.max, bounds.y.max, bounds.z.max
                    );
                }
                Err(e) => println!("       failed to load: {}", e),
            }
        }
    }

    println!("\n--- Lights ---");
    for light in &description.lights {
        println!("  {:?}", light);
    }

    println!("\n--- Settings ---");
    println!("  {:?}", description.settings);
}
