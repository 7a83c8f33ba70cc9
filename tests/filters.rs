use gdc_portal::domain::ProjectId;
use gdc_portal::filters::{clinical_data_filter, expression_data_filter};
use serde_json::{Value, json};

fn predicates(filter_value: &Value) -> &Vec<Value> {
    assert_eq!(filter_value["op"], "and");
    filter_value["content"].as_array().unwrap()
}

#[test]
fn expression_filter_is_a_seven_way_conjunction() {
    let project: ProjectId = "TCGA-BRCA".parse().unwrap();
    let value = serde_json::to_value(expression_data_filter(&project)).unwrap();

    let content = predicates(&value);
    assert_eq!(content.len(), 7);
    assert!(content.contains(&json!({
        "op": "in",
        "content": {"field": "cases.project.project_id", "value": ["TCGA-BRCA"]}
    })));
    assert!(content.contains(&json!({
        "op": "in",
        "content": {"field": "files.analysis.workflow_type", "value": ["STAR - Counts"]}
    })));
    assert!(content.contains(&json!({
        "op": "in",
        "content": {"field": "files.experimental_strategy", "value": ["RNA-Seq"]}
    })));
}

#[test]
fn clinical_filter_is_a_five_way_conjunction() {
    let project: ProjectId = "TCGA-LUAD".parse().unwrap();
    let value = serde_json::to_value(clinical_data_filter(&project)).unwrap();

    let content = predicates(&value);
    assert_eq!(content.len(), 5);
    assert!(content.contains(&json!({
        "op": "in",
        "content": {"field": "cases.project.project_id", "value": ["TCGA-LUAD"]}
    })));
    assert!(content.contains(&json!({
        "op": "in",
        "content": {"field": "files.data_format", "value": ["bcr xml"]}
    })));
    assert!(content.contains(&json!({
        "op": "in",
        "content": {"field": "files.data_type", "value": ["Clinical Supplement"]}
    })));
}

#[test]
fn both_filters_pin_the_tcga_program() {
    let project: ProjectId = "TCGA-OV".parse().unwrap();
    let program = json!({
        "op": "in",
        "content": {"field": "cases.project.program.name", "value": ["TCGA"]}
    });

    let expression = serde_json::to_value(expression_data_filter(&project)).unwrap();
    let clinical = serde_json::to_value(clinical_data_filter(&project)).unwrap();
    assert!(predicates(&expression).contains(&program));
    assert!(predicates(&clinical).contains(&program));
}
