//! Seed data for new lobbies: message templates, the sporting-goods product
//! catalog, and suppliers.
//!
//! The seed functions return fresh owned values on every call. A lobby
//! takes its own copy at creation time and may change it freely without
//! affecting other lobbies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Mail,
    Letter,
    Dunning,
    Invoice,
    FaultyInvoice,
}

/// A message body with `{{variable}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub kind: TemplateKind,
    pub locale: String,
    pub body: String,
    pub variables: Vec<String>,
}

impl Template {
    /// Substitute every `{{name}}` for which a value is given. Placeholders
    /// without a value stay in the text. Substituted values are not scanned
    /// again.
    pub fn render(&self, values: &BTreeMap<String, String>) -> String {
        let mut out = String::with_capacity(self.body.len());
        let mut rest = self.body.as_str();
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let value = after
                .find("}}")
                .and_then(|end| values.get(&after[..end]).map(|v| (end, v)));
            match value {
                Some((end, v)) => {
                    out.push_str(v);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Declared variables that `values` does not provide.
    pub fn missing_variables(&self, values: &BTreeMap<String, String>) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| !values.contains_key(v.as_str()))
            .map(String::as_str)
            .collect()
    }
}

fn template(id: &str, kind: TemplateKind, body: &str, variables: &[&str]) -> Template {
    Template {
        id: id.to_string(),
        kind,
        locale: "de".to_string(),
        body: body.to_string(),
        variables: variables.iter().map(|v| v.to_string()).collect(),
    }
}

pub fn seed_templates() -> Vec<Template> {
    vec![
        template(
            "mail_auftragsbestaetigung",
            TemplateKind::Mail,
            "Sehr {{anrede}},\n\n\
             vielen Dank für Ihre Bestellung vom {{datum}}.\n\n\
             Bestellnummer: {{bestellnummer}}\n\
             Produktname: {{produkt}}\n\
             Menge: {{menge}}\n\
             Gesamtpreis: {{gesamtpreis}} EUR\n\n\
             Wir werden die Ware schnellstmöglich bearbeiten und versenden.\n\n\
             Mit freundlichen Grüßen\n\
             Ihr Verkaufsteam",
            &["anrede", "datum", "bestellnummer", "produkt", "menge", "gesamtpreis"],
        ),
        template(
            "brief_mahnung",
            TemplateKind::Dunning,
            "Sehr {{anrede}},\n\n\
             trotz mehrfacher Zahlungsaufforderungen haben wir Ihre Zahlung für folgende Rechnung noch nicht erhalten:\n\n\
             Rechnungsnummer: {{rechnungsnr}}\n\
             Fälligkeitsdatum: {{faelligkeitsdatum}}\n\
             Betrag: {{betrag}} EUR\n\n\
             Wir bitten Sie hiermit eindringlich, den ausstehenden Betrag innerhalb von {{tage}} Tagen auf unser Konto zu überweisen.\n\n\
             Sollten Sie die Zahlung bereits geleistet haben, bitten wir um Entschuldigung.\n\n\
             Mit freundlichen Grüßen\n\
             {{absender}}",
            &["anrede", "rechnungsnr", "faelligkeitsdatum", "betrag", "tage", "absender"],
        ),
        template(
            "mail_bestellung_eingang",
            TemplateKind::Mail,
            "Sehr {{anrede}},\n\n\
             wir bestätigen den Eingang Ihrer Bestellung:\n\n\
             Bestellnummer: {{bestellnummer}}\n\
             Artikel: {{artikel}}\n\
             Menge: {{menge}}\n\
             Bestelldatum: {{bestelldatum}}\n\n\
             Für Rückfragen stehen wir Ihnen gerne zur Verfügung.\n\n\
             Mit freundlichen Grüßen\n\
             Einkaufsteam",
            &["anrede", "bestellnummer", "artikel", "menge", "bestelldatum"],
        ),
    ]
}

// ============================================================================
// PRODUCTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Shoes,
    Sneakers,
    Footballs,
    Sportswear,
    Smartwatches,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub size: Option<String>,
    pub colors: Vec<String>,
    pub material: Option<String>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub category: ProductCategory,
    pub name: String,
    pub description: String,
    pub brand: String,
    /// Wholesale purchase price per unit.
    pub base_price: f64,
    /// Manufacturer's recommended retail price (gross).
    pub recommended_retail_price: f64,
    pub attributes: ProductAttributes,
}

impl Product {
    /// Gross markup of the recommended retail price over the wholesale
    /// price, in percent.
    pub fn retail_markup_percent(&self) -> f64 {
        (self.recommended_retail_price - self.base_price) / self.base_price * 100.0
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    category: ProductCategory,
    name: &str,
    description: &str,
    brand: &str,
    base_price: f64,
    recommended_retail_price: f64,
    size: Option<&str>,
    colors: &[&str],
    material: &str,
    weight_kg: f64,
) -> Product {
    Product {
        id: id.to_string(),
        category,
        name: name.to_string(),
        description: description.to_string(),
        brand: brand.to_string(),
        base_price,
        recommended_retail_price,
        attributes: ProductAttributes {
            size: size.map(str::to_string),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            material: Some(material.to_string()),
            weight_kg: Some(weight_kg),
        },
    }
}

pub fn seed_products() -> Vec<Product> {
    use ProductCategory::*;
    vec![
        product("prod_shoe_001", Shoes, "ProRun Laufschuh", "Professioneller Laufschuh mit Dämpfung und Stabilität", "SportTech", 45.00, 89.99, Some("38-46"), &["Schwarz", "Weiß", "Blau"], "Mesh/Synthetik", 0.28),
        product("prod_shoe_002", Shoes, "TrailMaster Wanderschuh", "Robuster Wanderschuh für anspruchsvolle Touren", "MountainPro", 55.00, 119.99, Some("39-47"), &["Braun", "Grau", "Grün"], "Leder/Synthetik", 0.45),
        product("prod_shoe_003", Shoes, "CourtKing Tennisschuh", "Wendiger Tennisschuh für Sandplatz und Hartplatz", "AceSports", 38.00, 74.99, Some("36-44"), &["Weiß", "Blau/Weiß"], "Synthetik", 0.32),
        product("prod_sneaker_001", Sneakers, "Urban Classic Low", "Klassischer Lifestyle-Sneaker für den Alltag", "StreetStyle", 32.00, 64.99, Some("36-46"), &["Weiß", "Schwarz", "Rot", "Navy"], "Canvas/Gummi", 0.35),
        product("prod_sneaker_002", Sneakers, "RetroWave High-Top", "Retro-Sneaker im 80er-Jahre-Design", "VintageKicks", 42.00, 89.99, Some("38-45"), &["Schwarz/Gold", "Weiß/Pink", "Blau/Gelb"], "Leder/Synthetik", 0.42),
        product("prod_ball_001", Footballs, "MatchPro Fußball Gr. 5", "Offizieller Trainingsball nach FIFA-Norm", "BallMaster", 18.00, 39.99, Some("Größe 5"), &["Weiß/Schwarz", "Gelb/Blau", "Orange"], "Kunstleder", 0.43),
        product("prod_ball_002", Footballs, "Youth Training Ball Gr. 4", "Jugendtrainingsball für U14-Teams", "BallMaster", 14.00, 29.99, Some("Größe 4"), &["Weiß/Blau", "Gelb/Schwarz"], "Kunstleder", 0.38),
        product("prod_ball_003", Footballs, "Indoor Futsal Pro", "Spezieller Futsalball mit reduziertem Sprungverhalten", "IndoorSports", 22.00, 49.99, Some("Größe 4"), &["Weiß/Rot", "Gelb/Grün"], "Spezial-Kunstleder", 0.42),
        product("prod_cloth_001", Sportswear, "DryTech Running Shirt", "Atmungsaktives Laufshirt mit Feuchtigkeitstransport", "SportTech", 15.00, 32.99, Some("XS-XXL"), &["Schwarz", "Weiß", "Blau", "Rot", "Grün"], "Polyester", 0.15),
        product("prod_cloth_002", Sportswear, "FlexFit Sport-Leggings", "Elastische Trainingsleggings für maximale Bewegungsfreiheit", "ActiveWear", 18.00, 39.99, Some("XS-XL"), &["Schwarz", "Navy", "Grau"], "Elastan/Polyester", 0.22),
        product("prod_cloth_003", Sportswear, "Team Jersey Set", "Komplett-Set: Trikot und Hose für Mannschaften", "TeamGear", 28.00, 59.99, Some("XS-XXL"), &["Rot/Weiß", "Blau/Weiß", "Grün/Schwarz", "Gelb/Schwarz"], "Polyester", 0.35),
        product("prod_cloth_004", Sportswear, "Winter Training Jacket", "Wasserdichte Trainingsjacke für kalte Tage", "WeatherPro", 42.00, 89.99, Some("S-XXL"), &["Schwarz", "Navy", "Rot"], "Nylon/Fleece", 0.65),
        product("prod_watch_001", Smartwatches, "FitTrack Pro 5", "Fitness-Smartwatch mit Herzfrequenzmessung und GPS", "TechFit", 85.00, 179.99, None, &["Schwarz", "Silber", "Roségold"], "Aluminium/Silikon", 0.048),
        product("prod_watch_002", Smartwatches, "RunnerWatch Basic", "Einfache Laufuhr mit Distanz- und Zeitmessung", "SportTime", 45.00, 89.99, None, &["Schwarz", "Blau", "Grün"], "Kunststoff", 0.042),
        product("prod_watch_003", Smartwatches, "MultiSport Elite", "Premium-Smartwatch mit Multisport-Tracking und Wasserdichtigkeit", "ProAthlete", 145.00, 299.99, None, &["Schwarz", "Titan"], "Titan/Saphirglas", 0.062),
    ]
}

// ============================================================================
// SUPPLIERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Net payment period in days.
    pub days_net: u32,
    /// Cash discount for early payment, in percent.
    pub discount_percent: f64,
    /// Days within which the cash discount may be taken.
    pub days_discount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTerms {
    pub min_order_value: f64,
    pub delivery_days: u32,
    pub shipping_cost: f64,
    pub free_shipping_from: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    /// Empty in seed data; set when the supplier is copied into a lobby.
    pub lobby_id: String,
    pub name: String,
    pub legal_form: String,
    pub address: Address,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub payment_terms: PaymentTerms,
    pub delivery_terms: DeliveryTerms,
    /// 0–100, chance of delivering on time.
    pub reliability: u8,
    pub product_catalog: Vec<String>,
}

impl Supplier {
    pub fn supplies(&self, product_id: &str) -> bool {
        self.product_catalog.iter().any(|p| p == product_id)
    }
}

struct SupplierSeed<'a> {
    id: &'a str,
    name: &'a str,
    legal_form: &'a str,
    address: [&'a str; 3],
    contact_person: &'a str,
    email: &'a str,
    phone: &'a str,
    payment: (u32, f64, u32),
    delivery: (f64, u32, f64, f64),
    reliability: u8,
    catalog: &'a [&'a str],
}

impl SupplierSeed<'_> {
    fn build(&self) -> Supplier {
        let [street, postal_code, city] = self.address;
        let (days_net, discount_percent, days_discount) = self.payment;
        let (min_order_value, delivery_days, shipping_cost, free_shipping_from) = self.delivery;
        Supplier {
            id: self.id.to_string(),
            lobby_id: String::new(),
            name: self.name.to_string(),
            legal_form: self.legal_form.to_string(),
            address: Address {
                street: street.to_string(),
                postal_code: postal_code.to_string(),
                city: city.to_string(),
                country: "Deutschland".to_string(),
            },
            contact_person: self.contact_person.to_string(),
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            payment_terms: PaymentTerms {
                days_net,
                discount_percent,
                days_discount,
            },
            delivery_terms: DeliveryTerms {
                min_order_value,
                delivery_days,
                shipping_cost,
                free_shipping_from,
            },
            reliability: self.reliability,
            product_catalog: self.catalog.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub fn seed_suppliers() -> Vec<Supplier> {
    [
        SupplierSeed {
            id: "supp_001",
            name: "SportGroßhandel Müller GmbH",
            legal_form: "GmbH",
            address: ["Industriestraße 42", "80335", "München"],
            contact_person: "Herr Thomas Müller",
            email: "bestellung@sportmueller.de",
            phone: "+49 89 123456-0",
            payment: (30, 2.0, 10),
            delivery: (100.0, 3, 7.90, 500.0),
            reliability: 95,
            catalog: &[
                "prod_shoe_001",
                "prod_shoe_003",
                "prod_ball_001",
                "prod_ball_002",
                "prod_cloth_001",
                "prod_cloth_002",
                "prod_cloth_003",
            ],
        },
        SupplierSeed {
            id: "supp_002",
            name: "TechSport Import & Export AG",
            legal_form: "AG",
            address: ["Hafenweg 88", "20459", "Hamburg"],
            contact_person: "Frau Lisa Wagner",
            email: "orders@techsport.de",
            phone: "+49 40 987654-0",
            payment: (14, 3.0, 7),
            delivery: (200.0, 5, 9.90, 750.0),
            reliability: 88,
            catalog: &[
                "prod_watch_001",
                "prod_watch_002",
                "prod_watch_003",
                "prod_sneaker_001",
                "prod_sneaker_002",
            ],
        },
        SupplierSeed {
            id: "supp_003",
            name: "Outdoor & More Handelsgesellschaft",
            legal_form: "OHG",
            address: ["Bergstraße 15", "79098", "Freiburg"],
            contact_person: "Herr Michael Schmidt",
            email: "info@outdoormore.de",
            phone: "+49 761 555777-0",
            payment: (21, 2.5, 10),
            delivery: (150.0, 4, 6.90, 600.0),
            reliability: 92,
            catalog: &["prod_shoe_002", "prod_cloth_004", "prod_ball_003"],
        },
        SupplierSeed {
            id: "supp_004",
            name: "UrbanStyle Sportswear Einzelhandel",
            legal_form: "Einzelunternehmen",
            address: ["Modestraße 23", "10178", "Berlin"],
            contact_person: "Frau Anna Klein",
            email: "bestellung@urbanstyle-sport.de",
            phone: "+49 30 246810-0",
            payment: (14, 1.5, 7),
            delivery: (80.0, 2, 5.90, 400.0),
            reliability: 98,
            catalog: &[
                "prod_sneaker_001",
                "prod_sneaker_002",
                "prod_cloth_001",
                "prod_cloth_002",
                "prod_shoe_001",
            ],
        },
    ]
    .iter()
    .map(SupplierSeed::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(seed_templates().len(), 3);
        assert_eq!(seed_products().len(), 15);
        assert_eq!(seed_suppliers().len(), 4);
    }

    #[test]
    fn test_supplier_catalogs_reference_known_products() {
        let products = seed_products();
        for supplier in seed_suppliers() {
            for id in &supplier.product_catalog {
                assert!(
                    products.iter().any(|p| &p.id == id),
                    "{} lists unknown product {}",
                    supplier.id,
                    id
                );
            }
        }
    }

    #[test]
    fn test_every_product_has_a_supplier() {
        let suppliers = seed_suppliers();
        for product in seed_products() {
            assert!(
                suppliers.iter().any(|s| s.supplies(&product.id)),
                "{} has no supplier",
                product.id
            );
        }
    }

    #[test]
    fn test_retail_price_exceeds_base_price() {
        for product in seed_products() {
            assert!(product.recommended_retail_price > product.base_price);
            assert!(product.retail_markup_percent() > 0.0);
        }
    }

    #[test]
    fn test_seed_is_fresh_copy() {
        let mut a = seed_products();
        a[0].base_price = 1.0;
        let b = seed_products();
        assert_eq!(b[0].base_price, 45.0);
    }

    #[test]
    fn test_template_render() {
        let templates = seed_templates();
        let mahnung = templates.iter().find(|t| t.id == "brief_mahnung").unwrap();
        let mut values = BTreeMap::new();
        values.insert("anrede".to_string(), "geehrte Frau Klein".to_string());
        values.insert("betrag".to_string(), "250,00".to_string());

        let text = mahnung.render(&values);
        assert!(text.starts_with("Sehr geehrte Frau Klein,"));
        assert!(text.contains("Betrag: 250,00 EUR"));
        assert!(text.contains("{{tage}}"));

        let missing = mahnung.missing_variables(&values);
        assert_eq!(
            missing,
            vec!["rechnungsnr", "faelligkeitsdatum", "tage", "absender"]
        );
    }

    #[test]
    fn test_template_values_are_not_expanded_twice() {
        let templates = seed_templates();
        let mahnung = templates.iter().find(|t| t.id == "brief_mahnung").unwrap();
        let mut values = BTreeMap::new();
        values.insert("absender".to_string(), "{{betrag}}".to_string());
        values.insert("betrag".to_string(), "999".to_string());

        let text = mahnung.render(&values);
        assert!(text.ends_with("{{betrag}}"));
        assert!(text.contains("Betrag: 999 EUR"));
    }

    #[test]
    fn test_template_render_keeps_stray_braces() {
        let t = template("t", TemplateKind::Mail, "a {{ {{x}} }} {{y", &["x"]);
        let mut values = BTreeMap::new();
        values.insert("x".to_string(), "1".to_string());
        assert_eq!(t.render(&values), "a {{ 1 }} {{y");
    }

    #[test]
    fn test_template_variables_appear_in_body() {
        for t in seed_templates() {
            for v in &t.variables {
                assert!(t.body.contains(&format!("{{{{{}}}}}", v)), "{} missing {}", t.id, v);
            }
        }
    }
}
