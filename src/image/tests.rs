use super::*;

fn image_with_manifest(manifest: &str) -> Image {
    Image {
        metadata: ObjectMeta {
            name: "sha256:0123".into(),
            ..ObjectMeta::default()
        },
        docker_image_reference: "reg/ns/name@sha256:0123".into(),
        docker_image_manifest: manifest.into(),
        ..Image::default()
    }
}

fn manifest_with_history(v1_compatibility: &[&str]) -> String {
    let history: Vec<serde_json::Value> = v1_compatibility
        .iter()
        .map(|v1| serde_json::json!({ "v1Compatibility": v1 }))
        .collect();
    serde_json::json!({
        "schemaVersion": 1,
        "name": "ns/name",
        "tag": "latest",
        "architecture": "amd64",
        "history": history,
    })
    .to_string()
}

#[test]
fn no_manifest() {
    let image = image_with_manifest("");
    assert_eq!(image_with_metadata(image.clone()).unwrap(), image);
}

#[test]
fn capitalized_id() {
    let image = image_with_manifest(&manifest_with_history(&["{\"Id\":\"abc\"}"]));
    let extracted = image.with_metadata().unwrap();
    assert_eq!(extracted.docker_image_metadata.id, "abc");
    assert_eq!(extracted.docker_image_manifest, "");
    assert_eq!(extracted.docker_image_reference, image.docker_image_reference);
    assert_eq!(extracted.metadata, image.metadata);
}

#[test]
fn source_image_untouched() {
    let image = image_with_manifest(&manifest_with_history(&["{\"id\":\"abc\"}"]));
    let before = image.clone();
    let extracted = image.with_metadata().unwrap();
    assert_eq!(image, before);
    assert_ne!(extracted, before);
}

#[test]
fn docker_written_history() {
    let newest = r##"{
        "id": "2d24f826cb16146e2016ff349a8a33ed5830f3b938d45c0f82943f4ab8c097e7",
        "parent": "117ee323aaa9d1b136ea55e4421f4ce413dfc6c0cc6b2186dea6c88d93e1ad7c",
        "comment": "built by hand",
        "created": "2015-02-21T02:11:06.735146646Z",
        "container": "c9a3eda5951d28aa8dbe5933be94c523790721e4f80886d0a8e7a710132a38ec",
        "container_config": {
            "Hostname": "43bd710ec89a",
            "User": "",
            "Env": ["PATH=/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin"],
            "Cmd": ["/bin/sh", "-c", "#(nop) CMD [/bin/sh]"],
            "Image": "117ee323aaa9d1b136ea55e4421f4ce413dfc6c0cc6b2186dea6c88d93e1ad7c",
            "WorkingDir": "",
            "Entrypoint": null,
            "Labels": {}
        },
        "docker_version": "1.4.1",
        "author": "someone@example.com",
        "config": {
            "Hostname": "43bd710ec89a",
            "Cmd": ["/bin/sh"],
            "Entrypoint": null
        },
        "architecture": "amd64",
        "os": "linux",
        "Size": 0
    }"##;
    let older = r#"{"id": "117ee323aaa9d1b136ea55e4421f4ce413dfc6c0cc6b2186dea6c88d93e1ad7c", "Size": 2433303}"#;
    let image = image_with_manifest(&manifest_with_history(&[newest, older]));
    let metadata = image_with_metadata(image).unwrap().docker_image_metadata;

    assert_eq!(
        metadata.id,
        "2d24f826cb16146e2016ff349a8a33ed5830f3b938d45c0f82943f4ab8c097e7"
    );
    assert_eq!(
        metadata.parent,
        "117ee323aaa9d1b136ea55e4421f4ce413dfc6c0cc6b2186dea6c88d93e1ad7c"
    );
    assert_eq!(metadata.comment, "built by hand");
    assert_eq!(metadata.created, "2015-02-21T02:11:06.735146646Z");
    assert_eq!(
        metadata.container,
        "c9a3eda5951d28aa8dbe5933be94c523790721e4f80886d0a8e7a710132a38ec"
    );
    assert_eq!(metadata.container_config.hostname, "43bd710ec89a");
    assert_eq!(
        metadata.container_config.cmd,
        Some(vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            "#(nop) CMD [/bin/sh]".to_string()
        ])
    );
    assert_eq!(metadata.container_config.entrypoint, None);
    assert_eq!(metadata.docker_version, "1.4.1");
    assert_eq!(metadata.author, "someone@example.com");
    assert_eq!(
        metadata.config.map(|config| config.cmd),
        Some(Some(vec!["/bin/sh".to_string()]))
    );
    assert_eq!(metadata.architecture, "amd64");
    assert_eq!(metadata.size, 0);
}

#[test]
fn camel_case_history() {
    let v1 = r#"{"id":"abc","containerConfig":{"User":"nobody"},"dockerVersion":"1.6.0","size":42}"#;
    let image = image_with_manifest(&manifest_with_history(&[v1]));
    let metadata = image_with_metadata(image).unwrap().docker_image_metadata;
    assert_eq!(metadata.container_config.user, "nobody");
    assert_eq!(metadata.docker_version, "1.6.0");
    assert_eq!(metadata.size, 42);
}

#[test]
fn empty_history() {
    let image = image_with_manifest(&manifest_with_history(&[]));
    let extracted = image_with_metadata(image.clone()).unwrap();
    assert_eq!(extracted, image);
    assert!(!extracted.docker_image_manifest.is_empty());
}

#[test]
fn bad_manifest_json() {
    let image = image_with_manifest("{\"history\": ");
    match image_with_metadata(image) {
        Err(ImageError::ManifestDecode(_)) => (),
        other => panic!("unexpected result, {:?}", other),
    }
}

#[test]
fn bad_compatibility_json() {
    let image = image_with_manifest(&manifest_with_history(&["not json"]));
    match image_with_metadata(image) {
        Err(ImageError::ManifestDecode(_)) => (),
        other => panic!("unexpected result, {:?}", other),
    }
}

#[test]
fn compatibility_must_be_a_string() {
    let manifest = r#"{"history": [{"v1Compatibility": {"id": "abc"}}]}"#;
    assert!(image_with_metadata(image_with_manifest(manifest)).is_err());
}

#[test]
fn image_json_field_names() {
    let image = Image {
        docker_image_metadata: ImageMetadata {
            id: "abc".into(),
            size: 7,
            ..ImageMetadata::default()
        },
        ..Image::default()
    };
    let value = serde_json::to_value(&image).unwrap();
    assert_eq!(value["dockerImageMetadata"]["Id"], "abc");
    assert_eq!(value["dockerImageMetadata"]["Size"], 7);
    assert!(value.get("dockerImageManifest").is_none());
    let back: Image = serde_json::from_value(value).unwrap();
    assert_eq!(back, image);
}

#[test]
fn null_history() {
    let image = image_with_manifest(r#"{"schemaVersion": 1, "history": null}"#);
    let extracted = image_with_metadata(image.clone()).unwrap();
    assert_eq!(extracted, image);
}

#[test]
fn null_compatibility_fields() {
    let v1 = r#"{"Id":"abc","parent":null,"container_config":null,"Size":null}"#;
    let image = image_with_manifest(&manifest_with_history(&[v1]));
    let extracted = image_with_metadata(image).unwrap();
    assert_eq!(extracted.docker_image_metadata.id, "abc");
    assert_eq!(extracted.docker_image_metadata.parent, "");
    assert_eq!(
        extracted.docker_image_metadata.container_config,
        ContainerConfig::default()
    );
    assert_eq!(extracted.docker_image_metadata.size, 0);
    assert_eq!(extracted.docker_image_manifest, "");
}
