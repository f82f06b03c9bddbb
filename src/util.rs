use std::f32::consts::{PI, TAU};
use std::path::{Path, PathBuf};

use eframe::egui::{Vec2, vec2};

/// `separation_direction(a, b) == -separation_direction(b, a)`.
pub fn separation_direction(from: usize, to: usize) -> Vec2 {
    let (low, high, sign) = if from <= to {
        (from, to, 1.0)
    } else {
        (to, from, -1.0)
    };
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214 + 0.37) * TAU;
    vec2(angle.cos(), angle.sin()) * sign
}

pub fn phyllotaxis(index: usize) -> Vec2 {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let radius = 10.0 * (0.5 + index as f32).sqrt();
    let angle = index as f32 * golden_angle;
    vec2(angle.cos(), angle.sin()) * radius
}

pub fn document_dir(document: &Path) -> PathBuf {
    std::path::absolute(document)
        .ok()
        .and_then(|path| path.parent().map(Path::to_path_buf))
        .unwrap_or_default()
}

pub fn icon_uri(image: &str, document_dir: &Path) -> Option<String> {
    let image = image.trim();
    if image.is_empty() {
        return None;
    }
    if image.contains("://") {
        return Some(image.to_owned());
    }

    let path = Path::new(image);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        document_dir.join(path)
    };
    Some(format!("file://{}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_is_antisymmetric() {
        for (a, b) in [(0, 1), (3, 17), (42, 5)] {
            let forward = separation_direction(a, b);
            let backward = separation_direction(b, a);
            assert!((forward + backward).length() < 1e-6);
            assert!((forward.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn spiral_positions_are_distinct() {
        let points = (0..64).map(phyllotaxis).collect::<Vec<_>>();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!((*a - *b).length() > 1.0);
            }
        }
    }

    #[test]
    fn icon_uri_keeps_remote_and_resolves_local() {
        let dir = Path::new("/srv/maps");
        assert_eq!(
            icon_uri("https://icons.example/ec2.svg", dir).as_deref(),
            Some("https://icons.example/ec2.svg")
        );
        assert_eq!(
            icon_uri("icons/lambda.svg", dir).as_deref(),
            Some("file:///srv/maps/icons/lambda.svg")
        );
        assert_eq!(
            icon_uri("/opt/icons/s3.svg", dir).as_deref(),
            Some("file:///opt/icons/s3.svg")
        );
        assert_eq!(icon_uri("  ", dir), None);
    }

    #[test]
    fn document_dir_is_absolute_parent() {
        let dir = document_dir(Path::new("maps/cloudformation_map.json"));
        assert!(dir.is_absolute());
        assert!(dir.ends_with("maps"));
    }
}
