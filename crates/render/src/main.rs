//! wing-render: command-line front end for wing projects.
//!
//! Usage:
//!   wing-render render glider.json --out renders --format svg,stl
//!   wing-render info glider.json
//!   wing-render set glider.json "main wing" mirror true
//!   wing-render demo glider.json

mod svg;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use wing_engine::wing::mode_name;
use wing_engine::{WingDocument, WingKey};
use wing_file_format::{load_project, save_project, ProjectMetadata};
use wing_tessellation::{mesh_to_obj, mesh_to_stl, validate_mesh, TriangleMesh};
use wing_types::{Color, ConfigValue, CurveSlot, GenerationMode, PropertyKind, Sketch, SketchId};

use crate::svg::mesh_to_svg;

#[derive(Parser)]
#[command(name = "wing-render")]
#[command(about = "Loft, inspect and export wing projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Loft every wing and write one file per wing and format
    Render {
        /// Project file
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "renders")]
        out: PathBuf,

        /// Formats to write
        #[arg(short, long, value_delimiter = ',', default_value = "svg,stl")]
        format: Vec<Format>,

        /// Only render the wing with this name
        #[arg(short, long)]
        wing: Option<String>,
    },

    /// Print the wings of a project and their settings
    Info {
        /// Project file
        input: PathBuf,
    },

    /// Change one wing property and save the project
    Set {
        /// Project file
        input: PathBuf,

        /// Wing name
        wing: String,

        /// Property name, e.g. `mirror` or `num_sections`
        property: String,

        /// New value
        value: String,
    },

    /// Write a small sample project
    Demo {
        /// Output project file
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Stl,
    Obj,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            out,
            format,
            wing,
        } => cmd_render(&input, &out, &format, wing.as_deref()),
        Commands::Info { input } => cmd_info(&input),
        Commands::Set {
            input,
            wing,
            property,
            value,
        } => cmd_set(&input, &wing, &property, &value),
        Commands::Demo { output } => cmd_demo(&output),
    }
}

fn read_project(path: &Path) -> Result<(WingDocument, ProjectMetadata)> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let project = load_project(&json).with_context(|| format!("loading {}", path.display()))?;
    Ok(project)
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// A file stem for `name` not yet in `used`; clashes get `-2`, `-3`, ...
fn unique_stem(name: &str, used: &mut HashSet<String>) -> String {
    let base = file_stem(name);
    let mut stem = base.clone();
    let mut n = 2;
    while used.contains(&stem) {
        stem = format!("{base}-{n}");
        n += 1;
    }
    used.insert(stem.clone());
    stem
}

fn cmd_render(input: &Path, out: &Path, formats: &[Format], only: Option<&str>) -> Result<()> {
    let (mut doc, meta) = read_project(input)?;

    let keys: Vec<(WingKey, String)> = match only {
        Some(name) => match doc.find_by_name(name) {
            Some(key) => vec![(key, name.to_string())],
            None => bail!("no wing named {name:?} in {}", input.display()),
        },
        None => doc.wings().map(|(k, e)| (k, e.name.clone())).collect(),
    };

    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    println!("=== {} ===", meta.name);

    let mut used_stems = HashSet::new();
    for (key, name) in keys {
        let mut mesh = TriangleMesh::new();
        doc.render_wing(key, &mut mesh)?;
        if mesh.is_empty() {
            println!("  {name}: nothing to loft, skipped");
            continue;
        }
        validate_and_report(&name, &mesh);

        let color = doc.wing(key).map(|w| w.color()).unwrap_or_default();
        let stem = unique_stem(&name, &mut used_stems);
        for format in formats {
            let (ext, contents) = match format {
                Format::Svg => ("svg", mesh_to_svg(&mesh, 480.0, 360.0, &name, color)),
                Format::Stl => ("stl", mesh_to_stl(&mesh, &name)),
                Format::Obj => ("obj", mesh_to_obj(&mesh)),
            };
            let path = out.join(format!("{stem}.{ext}"));
            fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

fn validate_and_report(name: &str, mesh: &TriangleMesh) {
    let val = validate_mesh(mesh);
    let watertight = if val.is_watertight() { "watertight" } else { "open" };
    println!(
        "  {name}: {tris} tris, {verts} verts, {watertight}, area={area:.2}",
        tris = mesh.triangle_count(),
        verts = mesh.vertex_count(),
        area = val.surface_area,
    );
    if val.degenerate_triangles > 0 || val.non_manifold_edges > 0 {
        println!(
            "    degenerate={}, non_manifold={}",
            val.degenerate_triangles, val.non_manifold_edges
        );
    }
}

fn cmd_info(input: &Path) -> Result<()> {
    let (mut doc, meta) = read_project(input)?;

    println!("Project: {}", meta.name);
    println!("  created:  {}", meta.created.format("%Y-%m-%d %H:%M"));
    println!("  modified: {}", meta.modified.format("%Y-%m-%d %H:%M"));
    println!("  sketches: {}", doc.sketches().len());
    for sketch in doc.sketches().iter() {
        println!("    {} {} ({} points)", sketch.id, sketch.name, sketch.points.len());
    }

    let keys: Vec<WingKey> = doc.wings().map(|(k, _)| k).collect();
    println!("  wings: {}", keys.len());
    for key in keys {
        let bounds = doc.bounding_box(key)?;
        let Some(entry) = doc.entry(key) else {
            continue;
        };
        let wing = &entry.wing;
        println!("    {} ({})", entry.name, mode_name(&wing.mode()));
        for descriptor in doc.registry().visible(wing) {
            let value = (descriptor.get)(wing);
            println!("      {:<20} {}", descriptor.title, value);
        }
        match bounds {
            Some(bb) => println!(
                "      bounds: ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
                bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
            ),
            None => println!("      bounds: none"),
        }
    }
    Ok(())
}

fn parse_value(kind: PropertyKind, raw: &str) -> Result<ConfigValue> {
    let value = match kind {
        PropertyKind::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => ConfigValue::Bool(true),
            "false" | "no" | "0" => ConfigValue::Bool(false),
            _ => bail!("expected a boolean, got {raw:?}"),
        },
        PropertyKind::Int => ConfigValue::Int(
            raw.parse()
                .with_context(|| format!("expected an integer, got {raw:?}"))?,
        ),
        PropertyKind::Float => ConfigValue::Float(
            raw.parse()
                .with_context(|| format!("expected a number, got {raw:?}"))?,
        ),
        PropertyKind::String => ConfigValue::String(raw.to_string()),
    };
    Ok(value)
}

fn cmd_set(input: &Path, wing: &str, property: &str, raw: &str) -> Result<()> {
    let (mut doc, mut meta) = read_project(input)?;
    let Some(key) = doc.find_by_name(wing) else {
        bail!("no wing named {wing:?} in {}", input.display());
    };
    let Some(descriptor) = doc.registry().find(property) else {
        bail!("unknown property {property:?}");
    };
    let value = parse_value(descriptor.kind, raw)?;
    doc.set_property(key, property, value)?;

    meta.touch();
    fs::write(input, save_project(&doc, &meta))
        .with_context(|| format!("writing {}", input.display()))?;
    println!("{wing}: {property} = {}", doc.get_property(key, property)?);
    Ok(())
}

fn cmd_demo(output: &Path) -> Result<()> {
    let mut doc = WingDocument::new();
    doc.insert_sketch(Sketch::new(1, "leading edge", vec![[0.0, 0.0], [4.0, -0.6], [8.0, -1.6]]));
    doc.insert_sketch(Sketch::new(2, "trailing edge", vec![[0.0, -2.4], [4.0, -2.3], [8.0, -2.2]]));
    doc.insert_sketch(Sketch::new(
        3,
        "root aerofoil",
        vec![[0.0, 0.0], [0.1, 0.07], [0.3, 0.1], [0.6, 0.07], [1.0, 0.0]],
    ));
    doc.insert_sketch(Sketch::new(4, "tip aerofoil", vec![[0.0, 0.0], [0.3, 0.06], [1.0, 0.0]]));
    doc.insert_sketch(Sketch::new(5, "washout", vec![[0.0, 0.0], [1.0, -3.0]]));

    let mut main = wing_engine::Wing::new();
    main.set_color(Color::new(100, 160, 220));
    main.set_mirror(true);
    main.set_mode(GenerationMode::FixedCounts {
        num_sections: 8,
        num_profile_points: 24,
    });
    let slots = [
        (CurveSlot::LeadingEdge, 1),
        (CurveSlot::TrailingEdge, 2),
        (CurveSlot::RootProfile, 3),
        (CurveSlot::TipProfile, 4),
        (CurveSlot::AngleGraph, 5),
    ];
    for (slot, id) in slots {
        main.set_sketch(slot, Some(SketchId(id)));
    }
    doc.add_wing("main wing", main);

    let meta = ProjectMetadata::new("demo glider");
    fs::write(output, save_project(&doc, &meta))
        .with_context(|| format!("writing {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem("main wing/v2"), "main_wing_v2");
        assert_eq!(file_stem("tail-fin"), "tail-fin");
    }

    #[test]
    fn test_clashing_names_get_distinct_stems() {
        let mut used = HashSet::new();
        assert_eq!(unique_stem("a b", &mut used), "a_b");
        assert_eq!(unique_stem("a_b", &mut used), "a_b-2");
        assert_eq!(unique_stem("a/b", &mut used), "a_b-3");
        assert_eq!(unique_stem("a_b-2", &mut used), "a_b-2-2");
    }

    #[test]
    fn test_parse_value_by_kind() {
        assert_eq!(parse_value(PropertyKind::Bool, "True").unwrap(), ConfigValue::Bool(true));
        assert_eq!(parse_value(PropertyKind::Int, "12").unwrap(), ConfigValue::Int(12));
        assert!(parse_value(PropertyKind::Int, "twelve").is_err());
        assert!(parse_value(PropertyKind::Bool, "maybe").is_err());
    }

    #[test]
    fn test_cli_parses_format_list() {
        let cli = Cli::try_parse_from(["wing-render", "render", "p.json", "--format", "obj,svg"]).unwrap();
        match cli.command {
            Commands::Render { format, out, .. } => {
                assert_eq!(format, vec![Format::Obj, Format::Svg]);
                assert_eq!(out, PathBuf::from("renders"));
            }
            _ => panic!("expected render"),
        }
    }
}
