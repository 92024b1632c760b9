use crate::{
    catalog::layers::LayerCatalog,
    foundation::{core::ImageNumber, error::TraitmintResult},
    generate::combination::Combination,
};

/// Collection-wide strings that every metadata record is formatted from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataTemplate {
    /// Collection description, copied into every record.
    pub description: String,
    /// External link, copied into every record.
    pub external_url: String,
    /// Prefix of the `image` URI; the record appends `<n>.<image_extension>`.
    pub image_base_uri: String,
    /// Extension used in the `image` URI.
    pub image_extension: String,
    /// Prefix of the `name`; the record appends the image number.
    pub name_prefix: String,
}

impl Default for MetadataTemplate {
    fn default() -> Self {
        Self {
            description: "Helmet designed to explore moons!".to_string(),
            external_url: "https://www.reddit.com/r/CryptoCurrency".to_string(),
            image_base_uri: "https://storage.googleapis.com/".to_string(),
            image_extension: "png".to_string(),
            name_prefix: "Moon Helmet #".to_string(),
        }
    }
}

impl MetadataTemplate {
    /// `image` field for `n`.
    pub fn image_uri(&self, n: ImageNumber) -> String {
        format!("{}{}.{}", self.image_base_uri, n, self.image_extension)
    }

    /// `name` field for `n`.
    pub fn name(&self, n: ImageNumber) -> String {
        format!("{}{}", self.name_prefix, n)
    }
}

/// One displayable trait.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    /// Attribute name (`metadata_key` of the layer).
    pub trait_type: String,
    /// Attribute value (`metadata_value` of the layer).
    pub value: String,
}

/// Metadata document written next to each generated image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetadataRecord {
    /// Collection description.
    pub description: String,
    /// Collection link.
    pub external_url: String,
    /// Image URI derived from the image number.
    pub image: String,
    /// Display name derived from the image number.
    pub name: String,
    /// Raw image number.
    #[serde(rename = "tokenId")]
    pub token_id: u64,
    /// Displayable traits in compositing order.
    pub attributes: Vec<Attribute>,
}

/// Build the metadata record of one combination.
///
/// Layers with an empty `metadata_key` are structural and contribute no attribute.
pub fn build_metadata(
    combination: &Combination,
    catalog: &LayerCatalog,
    image_number: ImageNumber,
    template: &MetadataTemplate,
) -> TraitmintResult<MetadataRecord> {
    let mut attributes = Vec::new();
    for name in combination.layer_names() {
        let attrs = catalog.layer(name)?;
        if attrs.metadata_key.is_empty() {
            continue;
        }
        attributes.push(Attribute {
            trait_type: attrs.metadata_key.clone(),
            value: attrs.metadata_value.clone(),
        });
    }

    Ok(MetadataRecord {
        description: template.description.clone(),
        external_url: template.external_url.clone(),
        image: template.image_uri(image_number),
        name: template.name(image_number),
        token_id: image_number.0,
        attributes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/record.rs"]
mod tests;
