// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    officers (officer_id) {
        officer_id -> BigInt,
        email -> Text,
        name -> Text,
        role -> Text,
        law_section -> Nullable<Text>,
        district -> Nullable<Text>,
        active -> Integer,
    }
}

diesel::table! {
    establishments (establishment_id) {
        establishment_id -> BigInt,
        name -> Text,
        province -> Text,
        city -> Text,
        contact_email -> Nullable<Text>,
    }
}

diesel::table! {
    inspections (inspection_id) {
        inspection_id -> BigInt,
        code -> Text,
        law -> Text,
        district -> Nullable<Text>,
        current_state -> Text,
        current_assignee -> Nullable<BigInt>,
        created_by -> BigInt,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    inspection_establishments (link_id) {
        link_id -> BigInt,
        inspection_id -> BigInt,
        establishment_id -> BigInt,
    }
}

diesel::table! {
    inspection_forms (form_id) {
        form_id -> BigInt,
        inspection_id -> BigInt,
        scheduled_at -> Nullable<Text>,
        inspection_notes -> Nullable<Text>,
        checklist -> Nullable<Text>,
        findings_summary -> Nullable<Text>,
        compliance_decision -> Nullable<Text>,
        violations_found -> Nullable<Text>,
        compliance_plan -> Nullable<Text>,
        compliance_deadline -> Nullable<Text>,
    }
}

diesel::table! {
    inspection_documents (document_id) {
        document_id -> BigInt,
        inspection_id -> BigInt,
        file_ref -> Text,
        doc_type -> Text,
        uploaded_by -> Nullable<BigInt>,
        uploaded_at -> Text,
    }
}

diesel::table! {
    inspection_history (history_id) {
        history_id -> BigInt,
        inspection_id -> BigInt,
        previous_state -> Nullable<Text>,
        new_state -> Text,
        actor_id -> Nullable<BigInt>,
        actor_name -> Text,
        remarks -> Nullable<Text>,
        occurred_at -> Text,
    }
}

diesel::table! {
    notifications (notification_id) {
        notification_id -> BigInt,
        recipient_id -> Nullable<BigInt>,
        sender_id -> Nullable<BigInt>,
        kind -> Text,
        title -> Text,
        message -> Text,
        related_inspection -> Nullable<BigInt>,
        read -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    reinspection_obligations (obligation_id) {
        obligation_id -> BigInt,
        establishment_id -> BigInt,
        inspection_id -> Nullable<BigInt>,
        outcome -> Text,
        due_date -> Text,
        status -> Text,
        reminder_sent -> Integer,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    officers,
    establishments,
    inspections,
    inspection_establishments,
    inspection_forms,
    inspection_documents,
    inspection_history,
    notifications,
    reinspection_obligations,
);
