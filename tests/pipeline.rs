use glam::Vec3;
use spheregen::export::export_planet;
use spheregen::geometry::{CubeFace, direction_to_face_coordinates};
use spheregen::mesh::{UvMode, build_sphere_mesh};
use spheregen::terrain::sample_height;
use spheregen::{ConfigError, PipelineError, TerrainConfig, TerrainNoiseConfig, generate_planet};

fn small_config(seed: u64) -> TerrainConfig {
    let mut config = TerrainConfig::default();
    config.seed = seed;
    config.resolution = 16;
    config.mesh_divisions = 5;
    config.erosion.particles = 25;
    config.erosion.iterations = 40;
    config
}

#[test]
fn test_generation_is_deterministic_per_seed() {
    let a = generate_planet(&small_config(9)).unwrap();
    let b = generate_planet(&small_config(9)).unwrap();
    let c = generate_planet(&small_config(10)).unwrap();

    assert_eq!(a.height, b.height);
    assert_eq!(a.normal, b.normal);
    assert_eq!(a.splat, b.splat);
    assert_ne!(a.height, c.height);
}

#[test]
fn test_invalid_config_is_rejected_before_generation() {
    let config = TerrainConfig {
        resolution: 0,
        ..small_config(1)
    };
    let err = generate_planet(&config).unwrap_err();
    assert!(
        matches!(err, PipelineError::InvalidConfig(ConfigError::Invalid(_))),
        "{}",
        err
    );
}

#[test]
fn test_flat_planet_mesh_and_maps_agree() {
    let mut config = small_config(1);
    config.noise = TerrainNoiseConfig::flat();
    config.erosion.enabled = false;
    let planet = generate_planet(&config).unwrap();
    let mesh = build_sphere_mesh(config.mesh_divisions, UvMode::Face);

    for vertex in &mesh.vertices {
        let direction = Vec3::from_array(vertex.position);
        let (point, height) = sample_height(direction, &planet.height);
        assert!((height - 0.5).abs() < 1e-6);
        assert!((point - direction).length() < 1e-5, "{} vs {}", point, direction);
    }
}

#[test]
fn test_pixel_directions_invert_to_pixel_centres() {
    let planet = generate_planet(&small_config(3)).unwrap();
    let height = &planet.height;
    let r = height.resolution();

    for face in CubeFace::ALL {
        for (i, j) in [(0, 0), (r - 1, 0), (r / 2, r / 3), (r - 1, r - 1)] {
            let coord = direction_to_face_coordinates(height.pixel_direction(face, i, j));
            assert_eq!(coord.face, face);
            assert!((coord.u - (i as f32 + 0.5) / r as f32).abs() < 1e-3);
            assert!((coord.v - (j as f32 + 0.5) / r as f32).abs() < 1e-3);
        }
    }
}

#[test]
fn test_config_file_to_exported_files() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("planet.toml");
    std::fs::write(
        &config_path,
        "seed = 77\nresolution = 8\nmesh_divisions = 3\nuv_mode = \"atlas\"\n\n[erosion]\nparticles = 5\niterations = 10\n",
    )
    .unwrap();

    let config = TerrainConfig::load_from_file(&config_path).unwrap();
    let planet = generate_planet(&config).unwrap();
    let mesh = build_sphere_mesh(config.mesh_divisions, config.uv_mode);
    let mesh_path = export_planet(&planet, &mesh, &dir.path().join("out"), "p").unwrap();

    let bytes = std::fs::read(mesh_path).unwrap();
    assert_eq!(&bytes[0..4], &54u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &48u32.to_le_bytes());
    for face in CubeFace::ALL {
        let path = dir.path().join("out").join(format!("p_splat_{}.png", face.short_name()));
        assert!(path.exists());
    }
}
