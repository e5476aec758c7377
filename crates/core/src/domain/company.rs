use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub String);

impl CompanyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/companies`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal: Option<String>,
}

/// Body of `PUT /api/companies/{id}`. Omitted fields keep their stored values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub seal: Option<String>,
}

/// Company as embedded in a quote or purchase order read (`companies` relation).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyRef {
    #[serde(default)]
    pub id: Option<CompanyId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CompanyPatch {
    /// Field-by-field comparison of an updated record against this patch and
    /// the record as it was before. Returns the first mismatch.
    pub fn verify(&self, before: &NewCompany, after: &Company) -> Result<(), String> {
        expect_field("name", self.name.as_deref().or(Some(before.name.as_str())), Some(&after.name))?;
        expect_field(
            "address",
            self.address.as_deref().or(before.address.as_deref()),
            after.address.as_ref(),
        )?;
        expect_field("phone", self.phone.as_deref().or(before.phone.as_deref()), after.phone.as_ref())?;
        expect_field("email", self.email.as_deref().or(before.email.as_deref()), after.email.as_ref())
    }
}

fn expect_field(field: &str, expected: Option<&str>, actual: Option<&String>) -> Result<(), String> {
    let expected = expected.unwrap_or_default();
    let actual = actual.map(String::as_str).unwrap_or_default();
    if expected == actual {
        Ok(())
    } else {
        Err(format!("{field}: expected `{expected}`, got `{actual}`"))
    }
}
