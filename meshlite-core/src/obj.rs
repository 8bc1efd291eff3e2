/// Parser for the line-oriented text mesh format (`v`, `vt`, `vn`, `f`)
///
/// Faces are expanded into an unshared triangle list: every emitted triangle
/// appends three fresh vertices, so the index buffer is always `0..n`.
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, space0, space1, u32 as index},
    combinator::{all_consuming, eof, map, opt, peek},
    multi::{many0, many1},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::MeshLoadError;
use crate::geometry::{MeshData, Vertex};
use crate::vector::{Vector2, Vector3};

/// One `pos[/tex][/norm]` reference inside a face record, 1-based
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceRef {
    position: u32,
    texture: Option<u32>,
    normal: Option<u32>,
}

#[derive(Debug, PartialEq)]
enum Record {
    Position(Vector3),
    TexCoord(Vector2),
    Normal(Vector3),
    Face(Vec<FaceRef>),
    Ignored,
}

/// Quad fan: the diagonal runs from the first referenced vertex
const TRIANGLE_FAN: [[usize; 3]; 1] = [[0, 1, 2]];
const QUAD_FAN: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// Load and triangulate a mesh file.
///
/// Failing to read the file is fatal for the whole load. Malformed records
/// inside the file are reported and skipped.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData, MeshLoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        log::error!("Failed to open mesh file {}: {}", path.display(), e);
        MeshLoadError::new(path, e)
    })?;

    // Exporters write comments in legacy encodings; bad bytes only spoil their own line
    let source = String::from_utf8_lossy(&bytes);
    let data = parse_mesh(&source);
    log::debug!(
        "Loaded {}: {} triangles, {} skipped records",
        path.display(),
        data.triangle_count(),
        data.skipped_records
    );
    Ok(data)
}

/// Parse mesh text into a flat triangle list
pub fn parse_mesh(source: &str) -> MeshData {
    let mut positions: Vec<Vector3> = Vec::new();
    let mut tex_coords: Vec<Vector2> = Vec::new();
    let mut normals: Vec<Vector3> = Vec::new();
    let mut mesh = MeshData::default();

    for (number, raw) in source.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let record = match parse_record(line) {
            Ok((_, record)) => record,
            Err(_) => {
                log::warn!("Skipping malformed record on line {}: {:?}", line_no, line);
                mesh.skipped_records += 1;
                continue;
            }
        };

        match record {
            Record::Position(p) => positions.push(p),
            Record::TexCoord(t) => tex_coords.push(t),
            Record::Normal(n) => normals.push(n),
            Record::Face(refs) => {
                let fan: &[[usize; 3]] = match refs.len() {
                    3 => &TRIANGLE_FAN,
                    4 => &QUAD_FAN,
                    n => {
                        log::warn!(
                            "Skipping face on line {}: expected 3 or 4 vertices, found {}",
                            line_no,
                            n
                        );
                        mesh.skipped_records += 1;
                        continue;
                    }
                };

                let corners: Option<Vec<Vertex>> = refs
                    .iter()
                    .map(|r| resolve(r, &positions, &tex_coords, &normals))
                    .collect();
                let Some(corners) = corners else {
                    log::warn!(
                        "Skipping face on line {}: position index out of range ({} positions seen)",
                        line_no,
                        positions.len()
                    );
                    mesh.skipped_records += 1;
                    continue;
                };

                for triangle in fan {
                    for &corner in triangle {
                        mesh.indices.push(mesh.vertices.len() as u32);
                        mesh.vertices.push(corners[corner]);
                    }
                }
            }
            Record::Ignored => {}
        }
    }

    mesh
}

/// Build a vertex from a face reference.
///
/// Returns `None` when the position does not exist. Missing or out-of-range
/// texture coordinates and normals fall back to zero.
fn resolve(
    r: &FaceRef,
    positions: &[Vector3],
    tex_coords: &[Vector2],
    normals: &[Vector3],
) -> Option<Vertex> {
    let position = lookup(positions, Some(r.position))?;
    let texture = lookup(tex_coords, r.texture).unwrap_or_default();
    let normal = lookup(normals, r.normal).unwrap_or_default();
    Some(Vertex::new(position, normal, texture))
}

fn lookup<T: Copy>(items: &[T], one_based: Option<u32>) -> Option<T> {
    let i = one_based?.checked_sub(1)?;
    items.get(i as usize).copied()
}

fn parse_record(input: &str) -> IResult<&str, Record> {
    let (rest, tag) = keyword(input)?;
    match tag {
        "v" => {
            let (rest, (x, y, z)) = vector3(rest)?;
            Ok((rest, Record::Position(Vector3::new(x, y, z))))
        }
        "vt" => {
            let (rest, (u, v)) = vector2(rest)?;
            Ok((rest, Record::TexCoord(Vector2::new(u, v))))
        }
        "vn" => {
            let (rest, (x, y, z)) = vector3(rest)?;
            Ok((rest, Record::Normal(Vector3::new(x, y, z))))
        }
        "f" => {
            let (rest, refs) = face_refs(rest)?;
            Ok((rest, Record::Face(refs)))
        }
        _ => Ok(("", Record::Ignored)),
    }
}

fn keyword(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

/// A float that ends at whitespace or the end of the line
fn number(input: &str) -> IResult<&str, f32> {
    terminated(float, peek(alt((space1, eof))))(input)
}

/// Optional extra components such as the `w` of `v x y z w`, then nothing else
fn extra_numbers(input: &str) -> IResult<&str, ()> {
    map(
        all_consuming(terminated(many0(preceded(space1, number)), space0)),
        |_| (),
    )(input)
}

fn vector2(input: &str) -> IResult<&str, (f32, f32)> {
    terminated(
        tuple((preceded(space1, number), preceded(space1, number))),
        extra_numbers,
    )(input)
}

fn vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    terminated(
        tuple((
            preceded(space1, number),
            preceded(space1, number),
            preceded(space1, number),
        )),
        extra_numbers,
    )(input)
}

/// Every reference on the rest of a face line; trailing garbage fails the record
fn face_refs(input: &str) -> IResult<&str, Vec<FaceRef>> {
    all_consuming(terminated(many1(preceded(space1, face_ref)), space0))(input)
}

/// `pos`, `pos/tex`, `pos//norm` or `pos/tex/norm`
fn face_ref(input: &str) -> IResult<&str, FaceRef> {
    map(
        tuple((
            index,
            opt(preceded(char('/'), opt(index))),
            opt(preceded(char('/'), opt(index))),
        )),
        |(position, texture, normal)| FaceRef {
            position,
            texture: texture.flatten(),
            normal: normal.flatten(),
        },
    )(input)
}
