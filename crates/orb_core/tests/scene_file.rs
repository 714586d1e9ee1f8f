use orb_core::{MaterialDesc, SceneDescription, SceneError};
use orb_math::Vec3;

const SCENE: &str = r#"{
    "width": 64,
    "height": 36,
    "samples_per_pixel": 4,
    "max_depth": 8,
    "camera": {
        "look_from": [4, 4, 4],
        "look_at": [0, 0, 0],
        "vertical_fov": 50,
        "aspect_ratio": 1.7778
    },
    "materials": {
        "glass": { "type": "dielectric", "ior": 1.217 },
        "lamp": { "type": "emissive" },
        "steel": { "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.2 },
        "earth": { "type": "textured", "texture": "earth.jpg", "horizontal_offset": 0.25 }
    },
    "objects": [
        { "center": [3.2, 3.2, 3.2], "radius": 0.25, "material": "glass" },
        { "center": [2, 4, 2], "radius": 1, "material": "lamp" },
        { "center": [2, 2, 2], "radius": 1, "material": "earth" }
    ],
    "render": { "seed": 7 }
}"#;

#[test]
fn parses_full_scene() {
    let scene = SceneDescription::from_json_str(SCENE).unwrap();
    scene.validate().unwrap();

    assert_eq!(scene.width, 64);
    assert_eq!(scene.camera.view_up, Vec3::Y);
    assert_eq!(scene.objects.len(), 3);
    assert!(scene.sky.is_none());
    assert_eq!(scene.render.seed, 7);
    assert_eq!(scene.render.gamma, 1.0);
    assert!(!scene.render.lights_visible);
    assert_eq!(scene.render.light_sampling.window, 2);

    assert_eq!(
        scene.materials["lamp"],
        MaterialDesc::Emissive { color: Vec3::ONE }
    );
    match &scene.materials["earth"] {
        MaterialDesc::Textured {
            albedo,
            texture,
            horizontal_offset,
        } => {
            assert_eq!(*albedo, Vec3::ONE);
            assert_eq!(texture, "earth.jpg");
            assert_eq!(*horizontal_offset, 0.25);
        }
        other => panic!("unexpected material {other:?}"),
    }
}

#[test]
fn light_sampling_overrides_merge_with_defaults() {
    // Older files carry a separate emissive bias; lights never scatter, so
    // the key is accepted and ignored
    let json = SCENE.replace(
        r#""render": { "seed": 7 }"#,
        r#""render": { "light_sampling": { "diffuse_probability": 0.3, "emissive_probability": 0.05 } }"#,
    );
    let scene = SceneDescription::from_json_str(&json).unwrap();
    scene.validate().unwrap();

    let ls = &scene.render.light_sampling;
    assert_eq!(ls.diffuse_probability, 0.3);
    assert_eq!((ls.window, ls.probe_depth, ls.probe_max_depth), (2, 2, 5));
}

#[test]
fn rejects_unknown_material_kind() {
    let json = SCENE.replace("\"dielectric\"", "\"plasma\"");
    assert!(matches!(
        SceneDescription::from_json_str(&json),
        Err(SceneError::Parse(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        SceneDescription::load("/no/such/scene.json"),
        Err(SceneError::Io(_))
    ));
}

#[test]
fn round_trips_through_json() {
    let scene = SceneDescription::from_json_str(SCENE).unwrap();
    let text = serde_json::to_string(&scene).unwrap();
    assert_eq!(SceneDescription::from_json_str(&text).unwrap(), scene);
}

#[test]
fn shipped_scenes_are_valid() {
    for text in [
        include_str!("../../../scenes/spheres.json"),
        include_str!("../../../scenes/earth.json"),
    ] {
        let scene = SceneDescription::from_json_str(text).unwrap();
        scene.validate().unwrap();
    }
}
