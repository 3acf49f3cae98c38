use crate::schema::documents;

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = documents)]
pub struct DocumentRow {
  pub slot: String,
  pub body: String,
  pub updated_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow<'a> {
  pub slot: &'a str,
  pub body: &'a str,
  pub updated_at: &'a str,
}
