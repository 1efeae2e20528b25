#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use packroot_converter::filter::filter_by_embedded_parents;
use packroot_converter::handler::HandlerRegistry;
use packroot_converter::types::{Artifact, Relations};

/// 퍼저용 구조적 아티팩트 입력
#[derive(Arbitrary, Debug)]
struct FuzzArtifact {
    id: Option<u8>,
    name: String,
    package_type: FuzzPackageType,
    parents: Vec<u8>,
}

#[derive(Arbitrary, Debug)]
enum FuzzPackageType {
    Apk,
    Deb,
    Rpm,
    Python,
    Npm,
    Unknown,
}

impl FuzzPackageType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Apk => "apk",
            Self::Deb => "deb",
            Self::Rpm => "rpm",
            Self::Python => "python",
            Self::Npm => "npm",
            Self::Unknown => "mystery-type",
        }
    }
}

fn build(artifacts: &[FuzzArtifact]) -> Vec<Artifact> {
    artifacts
        .iter()
        .map(|fuzz| Artifact {
            id: fuzz.id.map(|n| format!("id-{n}")),
            name: fuzz.name.clone(),
            version: None,
            package_type: fuzz.package_type.as_str().to_owned(),
            relations: Some(Relations {
                parents_by_file_ownership: fuzz
                    .parents
                    .iter()
                    .map(|n| format!("id-{n}"))
                    .collect(),
            }),
            extra: Default::default(),
        })
        .collect()
}

// 임의의 소유 그래프(순환, 미해석 id, 중복 id 포함)에서 필터가 패닉 없이
// 동작해야 한다.
fuzz_target!(|input: Vec<FuzzArtifact>| {
    let artifacts = build(&input);
    let registry = HandlerRegistry::with_defaults();

    let survivors = filter_by_embedded_parents(&artifacts, &registry);

    // 생존자 수는 입력을 넘을 수 없고, 미지원 타입은 살아남지 못함
    assert!(survivors.len() <= artifacts.len());
    assert!(survivors.iter().all(|a| a.package_type != "mystery-type"));
});
