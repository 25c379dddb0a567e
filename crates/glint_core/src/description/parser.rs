//! Line-oriented scene description parser.
//!
//! One record per line, whitespace separated. Blank lines and anything after
//! `#` are ignored.
//!
//! # Records
//!
//! - `ambient <intensity> [r g b]`
//! - `directional <dx dy dz> <intensity> [r g b]`
//! - `point <x y z> <intensity> [r g b]`
//! - `sphere <x y z> <radius> <material>`
//! - `plane <x y z> <nx ny nz> <material>`
//! - `disk <x y z> <nx ny nz> <radius> <material>`
//! - `box <x y z> <sx sy sz> <material>`
//! - `triangle <x y z> <x y z> <x y z> <material>`
//! - `mesh <path> <material> [tx ty tz [rx ry rz [sx sy sz]]]`
//! - `texture <name> <path>`
//! - `material <name> <r g b> <specular> <ks> <kind> <texture|None> [ior]`
//! - `clear_color <r g b>`
//! - `batch_size <n>`
//! - `render_using <sequential|batches>`
//! - `max_depth <n>`
//! - `environment <path>`
//! - `camera <x y z> <fov> <near>`

use std::str::SplitWhitespace;

use super::records::*;
use super::{DescriptionError, DescriptionResult};
use crate::material::MaterialKind;

/// Parse a scene description in the line format.
pub fn parse_description(content: &str) -> DescriptionResult<SceneDescription> {
    let mut description = SceneDescription::default();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default();
        let mut tokens = Tokens {
            inner: line.split_whitespace(),
            line: index + 1,
        };
        let Some(keyword) = tokens.inner.next() else {
            continue;
        };
        parse_record(keyword, &mut tokens, &mut description)?;
        tokens.finish()?;
    }

    Ok(description)
}

fn parse_record(
    keyword: &str,
    tokens: &mut Tokens<'_>,
    description: &mut SceneDescription,
) -> DescriptionResult<()> {
    match keyword {
        "ambient" => {
            let intensity = tokens.f32("intensity")?;
            let color = tokens.optional_vec3("color")?.unwrap_or([1.0; 3]);
            description.lights.push(LightRecord::Ambient { intensity, color });
        }
        "directional" => {
            let direction = tokens.vec3("direction")?;
            let intensity = tokens.f32("intensity")?;
            let color = tokens.optional_vec3("color")?.unwrap_or([1.0; 3]);
            description.lights.push(LightRecord::Directional {
                direction,
                intensity,
                color,
            });
        }
        "point" => {
            let position = tokens.vec3("position")?;
            let intensity = tokens.f32("intensity")?;
            let color = tokens.optional_vec3("color")?.unwrap_or([1.0; 3]);
            description.lights.push(LightRecord::Point {
                position,
                intensity,
                color,
            });
        }
        "sphere" => {
            let position = tokens.vec3("position")?;
            let radius = tokens.f32("radius")?;
            let material = tokens.word("material")?;
            description.shapes.push(ShapeRecord::Sphere {
                position,
                radius,
                material,
            });
        }
        "plane" => {
            let position = tokens.vec3("position")?;
            let normal = tokens.vec3("normal")?;
            let material = tokens.word("material")?;
            description.shapes.push(ShapeRecord::Plane {
                position,
                normal,
                material,
            });
        }
        "disk" => {
            let position = tokens.vec3("position")?;
            let normal = tokens.vec3("normal")?;
            let radius = tokens.f32("radius")?;
            let material = tokens.word("material")?;
            description.shapes.push(ShapeRecord::Disk {
                position,
                normal,
                radius,
                material,
            });
        }
        "box" => {
            let position = tokens.vec3("position")?;
            let size = tokens.vec3("size")?;
            let material = tokens.word("material")?;
            description.shapes.push(ShapeRecord::Box {
                position,
                size,
                material,
            });
        }
        "triangle" => {
            let vertices = [
                tokens.vec3("first vertex")?,
                tokens.vec3("second vertex")?,
                tokens.vec3("third vertex")?,
            ];
            let material = tokens.word("material")?;
            description
                .shapes
                .push(ShapeRecord::Triangle { vertices, material });
        }
        "mesh" => {
            let path = tokens.word("path")?;
            let material = tokens.word("material")?;
            let translate = tokens.optional_vec3("translate")?.unwrap_or([0.0; 3]);
            let rotate = tokens.optional_vec3("rotate")?.unwrap_or([0.0; 3]);
            let scale = tokens.optional_vec3("scale")?.unwrap_or([1.0; 3]);
            description.shapes.push(ShapeRecord::Mesh {
                path,
                translate,
                rotate,
                scale,
                material,
            });
        }
        "texture" => {
            let name = tokens.word("name")?;
            let path = tokens.word("path")?;
            description.textures.push(TextureRecord { name, path });
        }
        "material" => {
            let name = tokens.word("name")?;
            let diffuse = tokens.vec3("diffuse")?;
            let specular = tokens.f32("specular exponent")?;
            let ks = tokens.f32("ks")?;
            let kind = tokens.word("kind")?;
            let kind = kind.parse::<MaterialKind>().map_err(|message| tokens.error(message))?;
            let texture = tokens.word("texture")?;
            let texture = (!texture.eq_ignore_ascii_case("none")).then_some(texture);
            let ior = tokens.optional_f32("ior")?.unwrap_or(1.0);
            description.materials.push(MaterialRecord {
                name,
                diffuse,
                specular,
                ks,
                kind,
                texture,
                ior,
            });
        }
        "clear_color" => {
            description.settings.clear_color = Some(tokens.vec3("clear color")?);
        }
        "batch_size" => {
            description.settings.batch_size = Some(tokens.u32("batch size")?);
        }
        "max_depth" => {
            description.settings.max_depth = Some(tokens.u32("max depth")?);
        }
        "render_using" => {
            let mode = tokens.word("execution mode")?;
            let mode = match mode.to_ascii_lowercase().as_str() {
                "sequential" => ExecutionMode::Sequential,
                "batches" | "batched" => ExecutionMode::Batched,
                other => {
                    return Err(tokens.error(format!("unknown execution mode '{}'", other)));
                }
            };
            description.settings.render_using = Some(mode);
        }
        "environment" => {
            description.settings.environment = Some(tokens.word("path")?);
        }
        "camera" => {
            let position = tokens.vec3("position")?;
            let fov = tokens.f32("fov")?;
            let near = tokens.f32("near")?;
            description.settings.camera = Some(CameraRecord {
                position,
                fov,
                near,
            });
        }
        other => {
            return Err(DescriptionError::UnknownRecord {
                line: tokens.line,
                keyword: other.to_string(),
            });
        }
    }

    Ok(())
}

/// Token cursor over one line.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    line: usize,
}

impl Tokens<'_> {
    fn error(&self, message: impl Into<String>) -> DescriptionError {
        DescriptionError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn word(&mut self, what: &str) -> DescriptionResult<String> {
        self.inner
            .next()
            .map(str::to_string)
            .ok_or_else(|| self.error(format!("missing {}", what)))
    }

    fn f32(&mut self, what: &str) -> DescriptionResult<f32> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| self.error(format!("missing {}", what)))?;
        self.parse_f32(token, what)
    }

    fn optional_f32(&mut self, what: &str) -> DescriptionResult<Option<f32>> {
        match self.inner.next() {
            Some(token) => self.parse_f32(token, what).map(Some),
            None => Ok(None),
        }
    }

    fn parse_f32(&self, token: &str, what: &str) -> DescriptionResult<f32> {
        let value: f32 = token
            .parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", what, token)))?;
        if !value.is_finite() {
            return Err(self.error(format!("non-finite {} '{}'", what, token)));
        }
        Ok(value)
    }

    fn u32(&mut self, what: &str) -> DescriptionResult<u32> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| self.error(format!("missing {}", what)))?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", what, token)))
    }

    fn vec3(&mut self, what: &str) -> DescriptionResult<[f32; 3]> {
        Ok([self.f32(what)?, self.f32(what)?, self.f32(what)?])
    }

    /// Three components or nothing at all.
    fn optional_vec3(&mut self, what: &str) -> DescriptionResult<Option<[f32; 3]>> {
        match self.optional_f32(what)? {
            Some(x) => Ok(Some([x, self.f32(what)?, self.f32(what)?])),
            None => Ok(None),
        }
    }

    fn finish(&mut self) -> DescriptionResult<()> {
        match self.inner.next() {
            Some(extra) => Err(self.error(format!("unexpected trailing token '{}'", extra))),
            None => Ok(()),
        }
    }
}
