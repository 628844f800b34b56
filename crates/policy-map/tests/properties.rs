use proptest::prelude::*;

use policy_map::{find_best_match, map_fields, similarity};
use policy_model::{Catalog, Catalogs, ExtractedData, FormData, FormField, MasterDataItem};

const WORDS: &[&str] = &[
    "NAFTA",
    "Gasoil",
    "particular",
    "TAXI",
    "Montevideo",
    "Canelones",
    "propietario",
    "CAMIONETA",
    "moto",
    "Todo riesgo",
    "Responsabilidad civil",
    "Tarifa general",
    "",
    "xyz",
];

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(WORDS).prop_map(str::to_string)
}

fn catalog_of(names: &[String]) -> Catalog {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| MasterDataItem::new(idx.to_string(), name.clone()))
        .collect()
}

fn catalogs() -> impl Strategy<Value = Catalogs> {
    let names = || prop::collection::vec(word(), 0..5);
    (names(), names(), names(), names(), names(), names()).prop_map(
        |(fuel, destination, department, quality, category, tariff)| Catalogs {
            combustibles: catalog_of(&fuel),
            destinos: catalog_of(&destination),
            departamentos: catalog_of(&department),
            calidades: catalog_of(&quality),
            categorias: catalog_of(&category),
            tarifas: catalog_of(&tariff),
        },
    )
}

fn extracted() -> impl Strategy<Value = ExtractedData> {
    let keys = prop::sample::select(vec![
        "combustible",
        "destino",
        "departamento",
        "calidad",
        "categoria",
        "modalidad",
        "vehiculo.uso",
    ]);
    prop::collection::vec((keys, word()), 0..7)
        .prop_map(|pairs| pairs.into_iter().collect::<ExtractedData>())
}

proptest! {
    #[test]
    fn identical_text_scores_one(text in "[a-zA-Z][a-zA-Z ]{0,20}") {
        prop_assert_eq!(similarity(&text, &text), 1.0);
    }

    #[test]
    fn similarity_stays_in_unit_range(a in ".{0,30}", b in ".{0,30}") {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score), "{score}");
    }

    #[test]
    fn best_match_never_below_threshold(
        text in word(),
        names in prop::collection::vec(word(), 0..8),
        threshold in 0.0f64..=1.0,
    ) {
        let catalog = catalog_of(&names);
        if let Some(found) = find_best_match(&text, &catalog, threshold) {
            prop_assert!(found.score >= threshold);
            prop_assert!(catalog.contains_id(&found.item.id));
        }
    }

    #[test]
    fn preset_fields_survive_any_input(
        extracted in extracted(),
        catalogs in catalogs(),
        preset in prop::sample::select(FormField::ALL.to_vec()),
        value in prop::sample::select(vec!["user-choice", " ", "0"]),
    ) {
        let mut current = FormData::default();
        current.set(preset, value);
        let outcome = map_fields(&extracted, &current, &catalogs);
        prop_assert_eq!(outcome.form.get(preset), value);
        prop_assert!(outcome.assignment(preset).is_none());
    }

    #[test]
    fn mapping_is_idempotent(extracted in extracted(), catalogs in catalogs()) {
        let first = map_fields(&extracted, &FormData::default(), &catalogs);
        let second = map_fields(&extracted, &first.form, &catalogs);
        prop_assert!(second.is_unchanged());
        prop_assert_eq!(second.form, first.form);
    }

    #[test]
    fn tariff_is_filled_whenever_catalog_has_entries(
        extracted in extracted(),
        catalogs in catalogs(),
    ) {
        let outcome = map_fields(&extracted, &FormData::default(), &catalogs);
        prop_assert_eq!(outcome.form.is_set(FormField::Tarifa), !catalogs.tarifas.is_empty());
    }
}
