use super::domain::{City, ListingStatus, Property, PropertyId, PropertyType};

/// Static listings shown when the data store is unreachable or empty.
pub fn sample_properties() -> Vec<Property> {
    vec![
        sample(
            "1",
            "Maison individuelle à Boulange",
            PropertyType::House,
            320_000,
            125.0,
            "Boulange",
            "Quartier calme, proche commodités",
            "Charmante maison individuelle située dans un secteur prisé de Boulange. Idéal pour une famille avec ses grands volumes.",
            &["4 Chambres", "Grand Jardin", "Garage Double"],
        ),
        sample(
            "2",
            "Appartement rénové à Hayange",
            PropertyType::Apartment,
            189_000,
            82.0,
            "Hayange",
            "Aucun travaux à prévoir",
            "Appartement lumineux entièrement rénové avec goût. Cuisine équipée moderne et salon spacieux.",
            &["2 Chambres", "Balcon", "Cave"],
        ),
        sample(
            "3",
            "Pavillon récent à Mercy-le-Bas",
            PropertyType::House,
            295_000,
            110.0,
            "Mercy-le-Bas",
            "Prestations modernes",
            "Belle opportunité à Mercy-le-Bas. Maison récente sous garantie décennale, faible consommation énergétique.",
            &["3 Chambres", "Pompe à chaleur", "Terrasse"],
        ),
        sample(
            "4",
            "Terrain à bâtir Spincourt",
            PropertyType::Land,
            85_000,
            850.0,
            "Spincourt",
            "Cadre verdoyant",
            "Beau terrain plat et viabilisé, libre de constructeur. Situé dans une rue calme de Spincourt.",
            &["Viabilisé", "Plat", "Façade 20m"],
        ),
    ]
}

/// Reference cities matching the sample listings.
pub fn sample_cities() -> Vec<City> {
    vec![
        City::new("Boulange", "Secteur Boulange / Audun"),
        City::new("Audun-le-Roman", "Secteur Boulange / Audun"),
        City::new("Mercy-le-Bas", "Cœur de Secteur (Pays-Haut)"),
        City::new("Spincourt", "Secteur Longuyon & Environs"),
        City::new("Longuyon", "Secteur Longuyon & Environs"),
        City::new("Longwy", "Bassin de Longwy & Frontières"),
        City::new("Hayange", "Vallée de la Fensch"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    title: &str,
    property_type: PropertyType,
    price: u64,
    surface: f64,
    city: &str,
    catch_phrase: &str,
    description: &str,
    features: &[&str],
) -> Property {
    Property {
        id: PropertyId(id.to_string()),
        title: title.to_string(),
        property_type: Some(property_type),
        status: Some(ListingStatus::Sale),
        marketing_label: None,
        price: Some(price),
        surface: Some(surface),
        rooms: None,
        city: city.to_string(),
        description: description.to_string(),
        catch_phrase: catch_phrase.to_string(),
        features: features.iter().map(|feature| feature.to_string()).collect(),
        images: Vec::new(),
        created_at: None,
    }
}
