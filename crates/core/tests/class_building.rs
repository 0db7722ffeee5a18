//! End-to-end event streams through the class builder.

use classmeta_api::{AccessFlags, Annotated, AnnotationError, AnnotationKind, AnnotationSchema, AnnotationValue};
use classmeta_core::{
    AnnotationVisitor, ClassHeader, ClassInfoBuilder, ClassInfoRepo, ClassVisitor, ConstantValue,
    FieldDecl, MethodDecl, MethodVisitor,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

struct Benchmark;

impl AnnotationKind for Benchmark {
    fn schema() -> &'static AnnotationSchema {
        static SCHEMA: Lazy<AnnotationSchema> =
            Lazy::new(|| AnnotationSchema::new("org.openjdk.jmh.annotations.Benchmark"));
        &SCHEMA
    }
}

struct Warmup;

impl AnnotationKind for Warmup {
    fn schema() -> &'static AnnotationSchema {
        static SCHEMA: Lazy<AnnotationSchema> = Lazy::new(|| {
            AnnotationSchema::new("org.openjdk.jmh.annotations.Warmup")
                .element_with_default("iterations", -1)
                .element_with_default("batchSize", -1)
                .element("timeUnit")
        });
        &SCHEMA
    }
}

fn bench_header() -> ClassHeader {
    ClassHeader {
        access: AccessFlags::PUBLIC,
        name: "com/acme/Bench".to_string(),
        signature: None,
        super_name: Some("java/lang/Object".to_string()),
        interfaces: vec!["java/io/Serializable".to_string()],
    }
}

#[test]
fn test_single_constructor_is_shared_with_methods() {
    let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
    builder.visit(bench_header()).unwrap();
    builder
        .visit_method(MethodDecl::new(AccessFlags::PUBLIC, "<init>", "()V"))
        .unwrap();
    let info = builder.finish().unwrap();

    assert_eq!(info.constructors().len(), 1);
    assert_eq!(info.declared_methods().len(), 1);
    assert!(Arc::ptr_eq(&info.constructors()[0], &info.declared_methods()[0]));
    assert!(info.constructors()[0].is_constructor());
}

#[test]
fn test_member_order_follows_events() {
    let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
    builder.visit(bench_header()).unwrap();
    for name in ["zeta", "alpha", "mid"] {
        builder
            .visit_field(FieldDecl::new(AccessFlags::PRIVATE, name, "I"))
            .unwrap();
    }
    for (name, desc) in [
        ("<init>", "()V"),
        ("zulu", "()V"),
        ("<init>", "(I)V"),
        ("alpha", "()I"),
    ] {
        builder
            .visit_method(MethodDecl::new(AccessFlags::PUBLIC, name, desc))
            .unwrap();
    }
    let info = builder.finish().unwrap();

    let fields: Vec<&str> = info.declared_fields().iter().map(|f| f.name()).collect();
    assert_eq!(fields, vec!["zeta", "alpha", "mid"]);

    let methods: Vec<&str> = info.declared_methods().iter().map(|m| m.name()).collect();
    assert_eq!(methods, vec!["<init>", "zulu", "<init>", "alpha"]);

    let ctor_descs: Vec<&str> = info.constructors().iter().map(|m| m.descriptor()).collect();
    assert_eq!(ctor_descs, vec!["()V", "(I)V"]);
    assert!(Arc::ptr_eq(&info.constructors()[1], &info.declared_methods()[2]));
    assert!(
        info.constructors()
            .iter()
            .all(|c| !Arc::ptr_eq(c, &info.declared_methods()[1]))
    );
}

#[test]
fn test_member_annotations_stay_with_their_member() {
    let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
    builder.visit(bench_header()).unwrap();

    let method = builder
        .visit_method(MethodDecl::new(AccessFlags::PUBLIC, "measure", "()V"))
        .unwrap();
    method
        .visit_annotation("Lorg/openjdk/jmh/annotations/Benchmark;", true)
        .unwrap();
    method
        .visit_annotation("Lorg/openjdk/jmh/annotations/Warmup;", true)
        .unwrap()
        .set_attribute("iterations", 5.into());

    builder
        .visit_method(MethodDecl::new(AccessFlags::PUBLIC, "helper", "()V"))
        .unwrap();

    let info = builder.finish().unwrap();
    assert!(info.get_annotation::<Benchmark>().is_none());

    let measure = &info.declared_methods()[0];
    let helper = &info.declared_methods()[1];
    assert!(measure.get_annotation::<Benchmark>().is_some());
    assert!(helper.get_annotation::<Benchmark>().is_none());

    let warmup = measure.get_annotation::<Warmup>().unwrap();
    assert_eq!(warmup.int("iterations").unwrap(), 5);
    assert_eq!(warmup.int("batchSize").unwrap(), -1);
    assert!(matches!(
        warmup.enum_constant("timeUnit"),
        Err(AnnotationError::MissingAttribute { .. })
    ));
}

#[test]
fn test_repeated_get_annotation_gives_independent_views() {
    let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
    builder.visit(bench_header()).unwrap();
    builder
        .visit_annotation("Lorg/openjdk/jmh/annotations/Warmup;", true)
        .unwrap()
        .set_attribute(
            "timeUnit",
            AnnotationValue::enum_constant("java.util.concurrent.TimeUnit", "SECONDS"),
        );
    let info = builder.finish().unwrap();

    let first = info.get_annotation::<Warmup>().unwrap();
    let second = info.get_annotation_recursive::<Warmup>().unwrap();
    drop(info);

    assert_eq!(first.enum_constant("timeUnit").unwrap(), "SECONDS");
    assert_eq!(
        first.enum_constant("timeUnit").unwrap(),
        second.enum_constant("timeUnit").unwrap()
    );
    assert_eq!(first.int("iterations").unwrap(), second.int("iterations").unwrap());
}

#[test]
fn test_header_extras_are_kept_as_names() {
    let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
    builder.visit(bench_header()).unwrap();
    let mut field = FieldDecl::new(AccessFlags::STATIC | AccessFlags::FINAL, "LIMIT", "J");
    field.constant_value = Some(ConstantValue::Long(42));
    builder.visit_field(field).unwrap();
    let info = builder.finish().unwrap();

    assert_eq!(info.super_name(), Some("java/lang/Object"));
    assert_eq!(info.interface_names(), ["java/io/Serializable".to_string()]);
    assert!(info.superclasses().is_empty());

    let limit = &info.declared_fields()[0];
    assert!(limit.is_static() && limit.is_final());
    assert_eq!(limit.constant_value(), Some(&ConstantValue::Long(42)));
    assert_eq!(limit.type_name().unwrap(), "long");
}

#[test]
fn test_qualified_name_is_package_plus_simple_name() {
    for name in ["com/acme/Bench", "a/B", "org/openjdk/jmh/Outer$Inner"] {
        let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
        builder
            .visit(ClassHeader::new(AccessFlags::PUBLIC, name))
            .unwrap();
        let info = builder.finish().unwrap();
        assert_eq!(
            info.qualified_name(),
            format!("{}.{}", info.package_name(), info.nested_name())
        );
        assert!(!info.nested_name().contains('.'));
        assert!(!info.nested_name().contains('/'));
    }
}

#[test]
fn test_modifier_predicates() {
    let mut builder = ClassInfoBuilder::new(ClassInfoRepo::new());
    builder
        .visit(ClassHeader::new(
            AccessFlags::ABSTRACT | AccessFlags::STRICT,
            "com/acme/Base",
        ))
        .unwrap();
    let info = builder.finish().unwrap();
    assert!(!info.is_public());
    assert!(info.is_abstract());
    assert!(info.is_strict_fp());
    assert!(!info.is_interface());
}
