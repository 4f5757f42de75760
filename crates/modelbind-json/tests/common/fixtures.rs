//! Documents shared by the integration tests.

/// A list item with schema-less columns, as returned by a sites API.
pub const UNTYPED_DOCUMENT: &str = r#"{
    "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#sites('contoso.sharepoint.com')/lists('fa631c4d-ac9f-4884-a7f5-13c659d177e3')/items('1')/fields/$entity",
    "id": "5",
    "title": "Project 101",
    "location": {
        "address": {
            "city": "Redmond",
            "postalCode": "98052",
            "state": "Washington",
            "street": "NE 36th St"
        },
        "coordinates": {
            "latitude": 47.641942,
            "longitude": -122.127222
        },
        "displayName": "Microsoft Building 92",
        "floorCount": 50,
        "hasReception": true,
        "contact": null
    },
    "keywords": [
        {
            "created": "2023-07-26T10:41:26Z",
            "label": "Keyword1",
            "termGuid": "10e9cc83-b5a4-4c8d-8dab-4ada1252dd70",
            "wssId": 6442450942
        },
        {
            "created": "2023-07-26T10:51:26Z",
            "label": "Keyword2",
            "termGuid": "2cae6c6a-9bb8-4a78-afff-81b88e735fef",
            "wssId": 6442450943
        }
    ],
    "detail": null,
    "table": [[1,2,3],[4,5,6],[7,8,9]],
    "extra": {
        "createdDateTime":"2024-01-15T00:00:00+00:00"
    }
}"#;

/// Primitive members at the root of one object.
pub const STATUS_DOCUMENT: &str = r#"{
    "id": "2",
    "status": 200,
    "item": null,
    "phones": [1,2,3]
}"#;

/// An entity collection with a `null` hole, next to a sparse number array.
pub const SPARSE_COLLECTIONS_DOCUMENT: &str = r#"{
    "id": "2",
    "status": 200,
    "item": null,
    "phones": [1,2, null,3],
    "testEntities": [
        {
            "id": "acbb4e46-0aa9-11ee-be56-0242ac120002",
            "officeLocation": "Nairobi",
            "sensitivity": "personal"
        },
        null,
        {
            "id": "acbb4e46-0aa9-11ee-be56-0242ac120002",
            "officeLocation": "Nairobi",
            "sensitivity": "confidential"
        }
    ]
}"#;
